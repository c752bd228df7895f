//! # Embedding module
//!
//! Embedding types, representation and the [`Embedder`] seam.
//!
//! ## Representation
//!
//! An embedding is a vector of 32-bit floating point numbers whose length is fixed by the model that produced it. [`Embedding`] is a wrapper around `Vec<f32>`, and is serialized as a plain JSON array of numbers.
//!
//! ## Conversion
//!
//! - [`Embedding`] can be converted from `Vec<f32>` and `&[f32]`, and back into `Vec<f32>`.
//! - [`Embedding`] can be immutably dereferenced to `[f32]`.
//!
//! ## Embedders
//!
//! Anything that turns an ordered batch of texts into an ordered batch of embeddings implements [`Embedder`]. [`ApiClient`](crate::ApiClient) is the one shipped with this crate.

use super::FixtureError;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Wrapped embedding representation.
///
/// See [module-level documentation](crate::embedding) for more details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding {
    inner: Vec<f32>,
}

impl Embedding {
    /// Number of dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.inner.len()
    }

    /// Ensure the embedding has exactly `expected` dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`](FixtureError::DimensionMismatch) otherwise.
    pub fn check_dimension(&self, expected: usize) -> Result<(), FixtureError> {
        let actual = self.inner.len();
        if actual == expected {
            Ok(())
        } else {
            Err(FixtureError::DimensionMismatch { expected, actual })
        }
    }
}

// Conversion

impl From<Vec<f32>> for Embedding {
    fn from(inner: Vec<f32>) -> Self {
        Self { inner }
    }
}

impl From<&[f32]> for Embedding {
    fn from(value: &[f32]) -> Self {
        Self::from(value.to_vec())
    }
}

impl From<Embedding> for Vec<f32> {
    fn from(embedding: Embedding) -> Self {
        embedding.inner
    }
}

// Implement `Deref` for `Embedding`

impl Deref for Embedding {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Turns texts into embeddings.
#[allow(async_fn_in_trait, reason = "Only used with concrete types")]
pub trait Embedder {
    /// Embed all texts at once. The result has one embedding per text, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the embeddings cannot be computed.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, FixtureError>;
}
