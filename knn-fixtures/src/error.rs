//! # Error module
//!
//! Possible errors. All of them are fatal to a generation run.

use thiserror::Error;

/// Possible errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The embedding service could not be reached, or its response could not be decoded.
    #[error("embedding request failed: {0}")]
    Embedding(#[from] reqwest::Error),
    /// The embedding service answered with a non-success status.
    #[error("embedding service returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the service.
        message: String,
    },
    /// Number of embeddings differs from the number of input texts.
    #[error("expected {expected} embeddings, got {actual}")]
    CountMismatch {
        /// Number of input texts.
        expected: usize,
        /// Number of embeddings returned.
        actual: usize,
    },
    /// An embedding is not at the position its index claims, e.g. duplicate or out-of-range indices.
    #[error("embedding at position {position} has index {index}")]
    IndexMismatch {
        /// Position in the sorted batch.
        position: usize,
        /// Index reported by the service.
        index: usize,
    },
    /// Embedding has an unexpected number of dimensions.
    #[error("embedding must be {expected}-dimensional, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
    /// No target label is mapped for the category.
    #[error("no target mapped for category `{0}`")]
    UnmappedCategory(String),
    /// A target row references a point that was never loaded.
    #[error("point UID `{0}` not found")]
    UnknownPoint(String),
    /// A point UID was seen twice with different categories.
    #[error("point UID `{uid}` has conflicting categories: expected `{expected}`, got `{actual}`")]
    ConflictingCategory {
        /// Point UID.
        uid: String,
        /// Category seen first.
        expected: String,
        /// Category seen later.
        actual: String,
    },
    /// A line of newline-delimited JSON could not be parsed.
    #[error("invalid record on line {line}: {source}")]
    Parse {
        /// Line number, starting from 1.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// A line could not be read, e.g. it is not valid UTF-8.
    #[error("cannot read line {line}: {source}")]
    Read {
        /// Line number, starting from 1.
        line: usize,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// A record could not be encoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Reading or writing failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
