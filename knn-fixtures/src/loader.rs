//! # Loader module
//!
//! Reads generated datasets back, joining target scores onto their points.

use super::{jsonl, FixtureError};
use serde::Deserialize;
use std::{collections::BTreeMap, io::BufRead};

/// Point row, as far as the loader is concerned.
#[derive(Deserialize)]
struct PointRow {
    point_uid: String,
    category: String,
}

/// A target label with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Target label.
    pub target: String,
    /// Score of the target.
    pub score: f32,
}

/// Target score row.
#[derive(Deserialize)]
struct ScoreRow {
    point_uid: String,
    target: String,
    score: f32,
}

/// A point's category and all target scores referencing it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoredPoint {
    /// Category of the point.
    pub category: String,
    /// Scores, in file order.
    pub scores: Vec<Score>,
}

/// Joins points and target scores by point UID.
#[derive(Debug, Default)]
pub struct Loader {
    points: BTreeMap<String, ScoredPoint>,
}

impl Loader {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load point rows. Fields other than `point_uid` and `category` are ignored.
    ///
    /// Nothing is loaded if any row is rejected.
    ///
    /// # Errors
    ///
    /// Returns a parse error, or [`ConflictingCategory`](FixtureError::ConflictingCategory) if a UID
    /// reappears with another category.
    pub fn load_points<R: BufRead>(&mut self, reader: R) -> Result<usize, FixtureError> {
        let rows: Vec<PointRow> = jsonl::read(reader)?;
        let count = rows.len();

        let mut staged: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let existing = self
                .points
                .get(&row.point_uid)
                .map(|point| &point.category)
                .or_else(|| staged.get(&row.point_uid));
            match existing {
                Some(category) if *category != row.category => {
                    return Err(FixtureError::ConflictingCategory {
                        expected: category.clone(),
                        uid: row.point_uid,
                        actual: row.category,
                    });
                }
                Some(_) => {}
                None => {
                    staged.insert(row.point_uid, row.category);
                }
            }
        }

        for (point_uid, category) in staged {
            self.points.insert(
                point_uid,
                ScoredPoint {
                    category,
                    scores: Vec::new(),
                },
            );
        }

        Ok(count)
    }

    /// Load target score rows, attaching each to its point.
    ///
    /// Nothing is attached if any row is rejected.
    ///
    /// # Errors
    ///
    /// Returns a parse error, or [`UnknownPoint`](FixtureError::UnknownPoint) if a row references a
    /// point not loaded before.
    pub fn load_scores<R: BufRead>(&mut self, reader: R) -> Result<usize, FixtureError> {
        let rows: Vec<ScoreRow> = jsonl::read(reader)?;
        let count = rows.len();

        if let Some(row) = rows.iter().find(|row| !self.points.contains_key(&row.point_uid)) {
            return Err(FixtureError::UnknownPoint(row.point_uid.clone()));
        }
        for row in rows {
            if let Some(point) = self.points.get_mut(&row.point_uid) {
                point.scores.push(Score {
                    target: row.target,
                    score: row.score,
                });
            }
        }

        Ok(count)
    }

    /// Look up a point.
    #[must_use]
    pub fn get(&self, point_uid: &str) -> Option<&ScoredPoint> {
        self.points.get(point_uid)
    }

    /// All points, ordered by UID.
    pub fn points(&self) -> impl Iterator<Item = (&str, &ScoredPoint)> {
        self.points.iter().map(|(uid, point)| (uid.as_str(), point))
    }

    /// Number of loaded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
