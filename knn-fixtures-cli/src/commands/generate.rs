//! `gen` subcommand

use crate::{config::OutputConfig, Config};
use anyhow::{Context, Result};
use argh::FromArgs;
use knn_fixtures::{generate_points, generate_targets, jsonl, ApiClient, REFERENCE_GROUPS};
use log::{debug, info};

/// generate points and targets from the reference utterances
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "gen", help_triggers("-h", "--help"))]
pub struct Generate {}

/// Summary of the generate operation.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Number of points written
    pub points: usize,
    /// Number of targets written
    pub targets: usize,
    /// Dimension of the embeddings
    pub dimension: usize,
}

impl Generate {
    /// Generate the dataset and write both files.
    pub async fn execute(&self, config: Config) -> Result<GenerateSummary> {
        let Config { api, output } = config;
        let OutputConfig {
            points: points_path,
            targets: targets_path,
        } = output;

        // The client only lives for this run
        let client = ApiClient::with_base_url(api.key, api.model, &api.base_url)?;
        info!("Embedding utterances with {}...", client.model().id());
        let points = generate_points(&client, REFERENCE_GROUPS)
            .await
            .with_context(|| "Failed to generate points")?;
        let targets = generate_targets(&points).with_context(|| "Failed to generate targets")?;
        debug!("Generated {} point(s), {} target(s)", points.len(), targets.len());

        jsonl::write_file(&points_path, &points)
            .with_context(|| format!("Failed to write {}", points_path.display()))?;
        info!("Wrote {}", points_path.display());
        jsonl::write_file(&targets_path, &targets)
            .with_context(|| format!("Failed to write {}", targets_path.display()))?;
        info!("Wrote {}", targets_path.display());

        Ok(GenerateSummary {
            points: points.len(),
            targets: targets.len(),
            dimension: points.first().map_or(0, |point| point.embedding.dimension()),
        })
    }
}
