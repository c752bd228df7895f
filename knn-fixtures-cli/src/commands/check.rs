//! `check` subcommand

use crate::Config;
use anyhow::{Context, Result};
use argh::FromArgs;
use knn_fixtures::Loader;
use log::debug;
use std::{collections::BTreeMap, fs::File, io::BufReader};

/// load generated points and targets, and summarize them
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "check", help_triggers("-h", "--help"))]
pub struct Check {}

/// Summary of the check operation.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Number of points
    pub points: usize,
    /// Number of targets
    pub targets: usize,
    /// Number of points per category
    pub categories: BTreeMap<String, usize>,
    /// Number of targets per label
    pub labels: BTreeMap<String, usize>,
    /// Number of points without any target
    pub unscored: usize,
}

impl Check {
    /// Load both files and count.
    pub fn execute(&self, config: Config) -> Result<CheckSummary> {
        let output = config.output;
        let mut loader = Loader::new();

        let points = File::open(&output.points).with_context(|| {
            format!(
                "Failed to open {}, consider generating first",
                output.points.display()
            )
        })?;
        loader
            .load_points(BufReader::new(points))
            .with_context(|| format!("Failed to load {}", output.points.display()))?;
        let targets = File::open(&output.targets).with_context(|| {
            format!(
                "Failed to open {}, consider generating first",
                output.targets.display()
            )
        })?;
        let targets = loader
            .load_scores(BufReader::new(targets))
            .with_context(|| format!("Failed to load {}", output.targets.display()))?;
        debug!("Loaded {} point(s) and {targets} target(s)", loader.len());

        let mut summary = CheckSummary {
            points: loader.len(),
            targets,
            ..CheckSummary::default()
        };
        for (_, point) in loader.points() {
            *summary.categories.entry(point.category.clone()).or_default() += 1;
            if point.scores.is_empty() {
                summary.unscored += 1;
            }
            for score in &point.scores {
                *summary.labels.entry(score.target.clone()).or_default() += 1;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, OutputConfig};
    use knn_fixtures::Model;
    use std::{fs, path::Path};

    fn config(dir: &Path) -> Config {
        Config {
            api: ApiConfig {
                key: String::new(),
                model: Model::default(),
                base_url: String::new(),
            },
            output: OutputConfig {
                points: dir.join("points.jsonl"),
                targets: dir.join("targets.jsonl"),
            },
        }
    }

    #[test]
    fn summarize() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("points.jsonl"),
            r#"{"point_uid":"a","category":"politics","utterance":"x","embedding":[1.0]}
{"point_uid":"b","category":"chitchat","utterance":"y","embedding":[2.0]}
{"point_uid":"c","category":"chitchat","utterance":"z","embedding":[3.0]}
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("targets.jsonl"),
            r#"{"point_uid":"a","target":"politics-agent","score":1.0}
{"point_uid":"b","target":"chitchat-agent","score":1.0}
"#,
        )
        .unwrap();

        let summary = Check {}.execute(config(dir.path())).unwrap();
        assert_eq!(summary.points, 3);
        assert_eq!(summary.targets, 2);
        assert_eq!(summary.categories["politics"], 1);
        assert_eq!(summary.categories["chitchat"], 2);
        assert_eq!(summary.labels["politics-agent"], 1);
        assert_eq!(summary.labels["chitchat-agent"], 1);
        assert_eq!(summary.unscored, 1);
    }

    #[test]
    fn dangling_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("points.jsonl"),
            r#"{"point_uid":"a","category":"politics"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("targets.jsonl"),
            r#"{"point_uid":"b","target":"politics-agent","score":1.0}"#,
        )
        .unwrap();

        let message = format!("{:#}", Check {}.execute(config(dir.path())).unwrap_err());
        assert!(message.contains("point UID `b` not found"), "{message}");
    }

    #[test]
    fn missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let message = format!("{:#}", Check {}.execute(config(dir.path())).unwrap_err());
        assert!(message.contains("consider generating first"), "{message}");
    }
}
