//! # API module
//!
//! Client for OpenAI-compatible embedding services, SiliconFlow by default.

use super::{embedding::Embedder, Embedding, FixtureError};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL of the embedding service.
pub const DEFAULT_BASE_URL: &str = "https://api.siliconflow.cn/v1";

/// Timeout for a single embedding request.
const TIMEOUT: Duration = Duration::from_secs(60);

/// Embedding models known to this crate.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    /// `BAAI/bge-small-en-v1.5`, 384 dimensions.
    #[default]
    #[serde(rename = "BAAI/bge-small-en-v1.5")]
    BgeSmallEnV1_5,
    /// `BAAI/bge-large-en-v1.5`, 1024 dimensions.
    #[serde(rename = "BAAI/bge-large-en-v1.5")]
    BgeLargeEnV1_5,
    /// `BAAI/bge-large-zh-v1.5`, 1024 dimensions.
    #[serde(rename = "BAAI/bge-large-zh-v1.5")]
    BgeLargeZhV1_5,
    /// `BAAI/bge-m3`, 1024 dimensions.
    #[serde(rename = "BAAI/bge-m3")]
    BgeM3,
}

impl Model {
    /// Model identifier, as sent to the service.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BgeSmallEnV1_5 => "BAAI/bge-small-en-v1.5",
            Self::BgeLargeEnV1_5 => "BAAI/bge-large-en-v1.5",
            Self::BgeLargeZhV1_5 => "BAAI/bge-large-zh-v1.5",
            Self::BgeM3 => "BAAI/bge-m3",
        }
    }

    /// Dimension of the embeddings produced by the model.
    #[must_use]
    pub const fn dimension(self) -> usize {
        match self {
            Self::BgeSmallEnV1_5 => 384,
            Self::BgeLargeEnV1_5 | Self::BgeLargeZhV1_5 | Self::BgeM3 => 1024,
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: Model,
    input: &'a [&'a str],
    encoding_format: &'static str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

/// A client for the embedding API.
pub struct ApiClient {
    /// API key. Empty for services without authentication.
    key: String,
    /// Model to use.
    model: Model,
    /// Full URL of the embeddings endpoint.
    endpoint: String,
    /// HTTP client.
    client: Client,
}

impl ApiClient {
    /// Create a client for the default service.
    ///
    /// # Errors
    ///
    /// Returns [`Embedding`](FixtureError::Embedding) if the HTTP client cannot be built.
    pub fn new(key: String, model: Model) -> Result<Self, FixtureError> {
        Self::with_base_url(key, model, DEFAULT_BASE_URL)
    }

    /// Create a client for the service at `base_url`, e.g. `http://localhost:8080/v1`.
    ///
    /// # Errors
    ///
    /// Returns [`Embedding`](FixtureError::Embedding) if the HTTP client cannot be built.
    pub fn with_base_url(key: String, model: Model, base_url: &str) -> Result<Self, FixtureError> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        let endpoint = format!("{}/embeddings", base_url.trim_end_matches('/'));

        Ok(Self {
            key,
            model,
            endpoint,
            client,
        })
    }

    /// The model in use.
    #[must_use]
    pub const fn model(&self) -> Model {
        self.model
    }

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// See [`Embedder::embed_batch`].
    pub async fn embed(&self, text: &str) -> Result<Embedding, FixtureError> {
        let mut embeddings = Embedder::embed_batch(self, &[text]).await?;
        embeddings.pop().ok_or(FixtureError::CountMismatch {
            expected: 1,
            actual: 0,
        })
    }
}

impl Embedder for ApiClient {
    /// Embed all texts in one request.
    ///
    /// # Errors
    ///
    /// - [`Embedding`](FixtureError::Embedding) if the request fails or the response is malformed.
    /// - [`Api`](FixtureError::Api) if the service answers with a non-success status.
    /// - [`CountMismatch`](FixtureError::CountMismatch) if the number of embeddings differs from the number of texts.
    /// - [`IndexMismatch`](FixtureError::IndexMismatch) if the indices are not exactly `0..texts.len()`.
    /// - [`DimensionMismatch`](FixtureError::DimensionMismatch) if an embedding does not match the model's dimension.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, FixtureError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(
            "Requesting {} embedding(s) from {} with model {}",
            texts.len(),
            self.endpoint,
            self.model.id()
        );

        let request = EmbeddingRequest {
            model: self.model,
            input: texts,
            encoding_format: "float",
        };
        let mut builder = self.client.post(&self.endpoint).json(&request);
        if !self.key.is_empty() {
            builder = builder.bearer_auth(&self.key);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FixtureError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut body: EmbeddingResponse = response.json().await?;
        if body.data.len() != texts.len() {
            return Err(FixtureError::CountMismatch {
                expected: texts.len(),
                actual: body.data.len(),
            });
        }
        // The service may answer out of order
        body.data.sort_by_key(|item| item.index);

        let dimension = self.model.dimension();
        body.data
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                if item.index != position {
                    return Err(FixtureError::IndexMismatch {
                        position,
                        index: item.index,
                    });
                }
                let embedding = Embedding::from(item.embedding);
                embedding.check_dimension(dimension)?;
                Ok(embedding)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn response_body(items: &[(usize, f32)], dimension: usize) -> String {
        let data: Vec<_> = items
            .iter()
            .map(|&(index, value)| {
                json!({
                    "object": "embedding",
                    "index": index,
                    "embedding": vec![value; dimension],
                })
            })
            .collect();
        json!({ "object": "list", "model": "BAAI/bge-small-en-v1.5", "data": data }).to_string()
    }

    #[test]
    fn model_ids() {
        assert_eq!(Model::default(), Model::BgeSmallEnV1_5);
        assert_eq!(Model::BgeSmallEnV1_5.dimension(), 384);
        assert_eq!(Model::BgeM3.dimension(), 1024);
        // Serialized name matches the identifier
        for model in [
            Model::BgeSmallEnV1_5,
            Model::BgeLargeEnV1_5,
            Model::BgeLargeZhV1_5,
            Model::BgeM3,
        ] {
            assert_eq!(json!(model), json!(model.id()));
        }
    }

    #[tokio::test]
    async fn embed_batch_in_index_order() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .match_header("authorization", "Bearer test_key")
            .match_body(Matcher::PartialJson(json!({
                "model": "BAAI/bge-small-en-v1.5",
                "input": ["first", "second"],
                "encoding_format": "float",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body(&[(1, 2.0), (0, 1.0)], 384))
            .create_async()
            .await;

        let client =
            ApiClient::with_base_url("test_key".into(), Model::BgeSmallEnV1_5, &server.url())
                .unwrap();
        let embeddings = client.embed_batch(&["first", "second"]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(embeddings.len(), 2);
        assert!(embeddings[0].iter().all(|&f| f == 1.0));
        assert!(embeddings[1].iter().all(|&f| f == 2.0));
        assert_eq!(embeddings[0].dimension(), 384);
    }

    #[tokio::test]
    async fn no_auth_without_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/embeddings")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(response_body(&[(0, 0.5)], 1024))
            .create_async()
            .await;

        let base_url = format!("{}/v1/", server.url());
        let client = ApiClient::with_base_url(String::new(), Model::BgeM3, &base_url).unwrap();
        let embedding = client.embed("hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(embedding.dimension(), 1024);
    }

    #[tokio::test]
    async fn empty_batch_skips_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .expect(0)
            .create_async()
            .await;

        let client =
            ApiClient::with_base_url("test_key".into(), Model::default(), &server.url()).unwrap();
        let embeddings = client.embed_batch(&[]).await.unwrap();

        mock.assert_async().await;
        assert!(embeddings.is_empty());
    }

    #[tokio::test]
    async fn service_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/embeddings")
            .with_status(401)
            .with_body("invalid token")
            .create_async()
            .await;

        let client =
            ApiClient::with_base_url("bad_key".into(), Model::default(), &server.url()).unwrap();
        let result = client.embed("hello").await;

        match result {
            Err(FixtureError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid token");
            }
            _ => panic!("expected an API error"),
        }
    }

    #[tokio::test]
    async fn count_mismatch() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_body(response_body(&[(0, 1.0)], 384))
            .create_async()
            .await;

        let client =
            ApiClient::with_base_url("test_key".into(), Model::default(), &server.url()).unwrap();
        let result = client.embed_batch(&["a", "b"]).await;

        assert!(matches!(
            result,
            Err(FixtureError::CountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[tokio::test]
    async fn duplicate_index() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_body(response_body(&[(0, 1.0), (0, 2.0)], 384))
            .create_async()
            .await;

        let client =
            ApiClient::with_base_url("test_key".into(), Model::default(), &server.url()).unwrap();
        let result = client.embed_batch(&["first", "second"]).await;

        assert!(matches!(
            result,
            Err(FixtureError::IndexMismatch {
                position: 1,
                index: 0
            })
        ));
    }

    #[tokio::test]
    async fn index_out_of_range() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_body(response_body(&[(0, 1.0), (2, 2.0)], 384))
            .create_async()
            .await;

        let client =
            ApiClient::with_base_url("test_key".into(), Model::default(), &server.url()).unwrap();
        let result = client.embed_batch(&["first", "second"]).await;

        assert!(matches!(
            result,
            Err(FixtureError::IndexMismatch {
                position: 1,
                index: 2
            })
        ));
    }

    #[tokio::test]
    async fn dimension_mismatch() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_body(response_body(&[(0, 1.0)], 8))
            .create_async()
            .await;

        let client =
            ApiClient::with_base_url("test_key".into(), Model::default(), &server.url()).unwrap();
        let result = client.embed("a").await;

        assert!(matches!(
            result,
            Err(FixtureError::DimensionMismatch {
                expected: 384,
                actual: 8
            })
        ));
    }
}
