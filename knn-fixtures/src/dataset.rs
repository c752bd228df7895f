//! # Dataset module
//!
//! Fake labeled dataset: [`Point`]s with their embeddings, and the [`Target`]s derived from them.

use super::{embedding::Embedder, Embedding, FixtureError};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Utterances sharing a category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryGroup<'a> {
    /// Category of all utterances in the group.
    pub category: &'a str,
    /// Utterances, in output order.
    pub utterances: &'a [&'a str],
}

/// Reference data: five political and five small-talk utterances.
pub const REFERENCE_GROUPS: &[CategoryGroup<'static>] = &[
    CategoryGroup {
        category: "politics",
        utterances: &[
            "isn't politics the best thing ever",
            "why don't you tell me about your political opinions",
            "don't you just love the president",
            "they're going to destroy this country!",
            "they will save the country!",
        ],
    },
    CategoryGroup {
        category: "chitchat",
        utterances: &[
            "how's the weather today?",
            "how are things going?",
            "lovely weather today",
            "the weather is horrendous",
            "let's go to the chippy",
        ],
    },
];

/// Category to target label.
const TARGETS: [(&str, &str); 2] = [
    ("politics", "politics-agent"),
    ("chitchat", "chitchat-agent"),
];

/// Score assigned to every generated target.
pub const TARGET_SCORE: f32 = 1.0;

/// A labeled example with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique identifier.
    pub point_uid: String,
    /// Category label.
    pub category: String,
    /// Text of the example.
    pub utterance: String,
    /// Embedding of `utterance`.
    pub embedding: Embedding,
}

/// Target label assigned to a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// UID of the point this target belongs to.
    pub point_uid: String,
    /// Target label.
    pub target: String,
    /// Score of the target for the point.
    pub score: f32,
}

/// Look up the target label of a category.
///
/// # Errors
///
/// Returns [`UnmappedCategory`](FixtureError::UnmappedCategory) if the category has no target.
pub fn target_for(category: &str) -> Result<&'static str, FixtureError> {
    TARGETS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|&(_, target)| target)
        .ok_or_else(|| FixtureError::UnmappedCategory(category.to_owned()))
}

/// Generate points for all utterances in `groups`, embedding them in a single batch.
///
/// Points are ordered by group, then by utterance.
///
/// # Errors
///
/// Returns the embedder's error, or [`CountMismatch`](FixtureError::CountMismatch) / [`DimensionMismatch`](FixtureError::DimensionMismatch) if the embeddings do not line up with the utterances.
pub async fn generate_points<E: Embedder>(
    embedder: &E,
    groups: &[CategoryGroup<'_>],
) -> Result<Vec<Point>, FixtureError> {
    let labeled: Vec<(&str, &str)> = groups
        .iter()
        .flat_map(|group| {
            group
                .utterances
                .iter()
                .map(move |&utterance| (group.category, utterance))
        })
        .collect();
    if labeled.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<&str> = labeled.iter().map(|&(_, utterance)| utterance).collect();
    let embeddings = embedder.embed_batch(&texts).await?;
    if embeddings.len() != texts.len() {
        return Err(FixtureError::CountMismatch {
            expected: texts.len(),
            actual: embeddings.len(),
        });
    }

    // All embeddings share the first one's dimension, which must be non-zero
    let dimension = embeddings[0].dimension();
    if dimension == 0 {
        return Err(FixtureError::DimensionMismatch {
            expected: 1,
            actual: 0,
        });
    }
    for embedding in &embeddings {
        embedding.check_dimension(dimension)?;
    }
    debug!("Embedded {} utterance(s), dimension {dimension}", texts.len());

    let points = labeled
        .into_iter()
        .zip(embeddings)
        .map(|((category, utterance), embedding)| Point {
            point_uid: Uuid::new_v4().to_string(),
            category: category.to_owned(),
            utterance: utterance.to_owned(),
            embedding,
        })
        .collect();

    Ok(points)
}

/// Derive one target per point, in the same order.
///
/// # Errors
///
/// Returns [`UnmappedCategory`](FixtureError::UnmappedCategory) if a point's category has no target.
pub fn generate_targets(points: &[Point]) -> Result<Vec<Target>, FixtureError> {
    points
        .iter()
        .map(|point| {
            Ok(Target {
                point_uid: point.point_uid.clone(),
                target: target_for(&point.category)?.to_owned(),
                score: TARGET_SCORE,
            })
        })
        .collect()
}
