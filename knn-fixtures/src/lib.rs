//! # KNN Fixtures Library
//!
//! `knn-fixtures` generates a small fake labeled dataset for KNN routing.
//!
//! Utterances are tagged with a category and embedded by an embedding service, becoming [`Point`]s. Each point is then assigned a [`Target`] label derived from its category. Both tables are written as newline-delimited JSON, and can be read back and joined with [`Loader`].

#![deny(missing_docs)]
#![warn(clippy::all, clippy::nursery, clippy::pedantic, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, reason = "Dependencies")]

mod api;
pub mod dataset;
pub mod embedding;
mod error;
pub mod jsonl;
pub mod loader;

pub use api::{ApiClient, Model, DEFAULT_BASE_URL};
pub use dataset::{generate_points, generate_targets, Point, Target, REFERENCE_GROUPS};
pub use embedding::{Embedder, Embedding};
pub use error::FixtureError;
pub use loader::Loader;
