//! Configuration file parser.

use anyhow::Result as AnyResult;
use std::path::{Path, PathBuf};

use knn_fixtures::Model;
use serde::Deserialize;

/// Structure of the configuration file.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// API configuration.
#[derive(Deserialize, Debug)]
pub struct ApiConfig {
    /// API key for the embedding service. Empty to send no credentials.
    pub key: String,
    /// Model to use for embedding.
    #[serde(default)]
    pub model: Model,
    /// Base URL of the embedding service.
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

/// Output configuration.
#[derive(Deserialize, Debug)]
pub struct OutputConfig {
    /// Path of the points file. Default is `points.jsonl`.
    #[serde(default = "defaults::points")]
    pub points: PathBuf,
    /// Path of the targets file. Default is `targets.jsonl`.
    #[serde(default = "defaults::targets")]
    pub targets: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            points: defaults::points(),
            targets: defaults::targets(),
        }
    }
}

/// Parse the configuration into a `Config` structure.
///
/// # Errors
///
/// Returns an [`Error`](toml::de::Error) if the configuration file is not valid, like missing fields.
fn parse_config_from_str(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Parse the configuration file into a `Config` structure.
///
/// # Errors
///
/// Returns an [IO error](std::io::Error) if reading fails, or a [TOML error](toml::de::Error) if parsing fails.
pub fn parse_config<T>(path: T) -> AnyResult<Config>
where
    T: AsRef<Path>,
{
    let content = std::fs::read_to_string(path)?;
    Ok(parse_config_from_str(&content)?)
}

/// Default values for the configuration.
mod defaults {
    use std::path::PathBuf;

    /// Default base URL of the embedding service.
    pub fn base_url() -> String {
        knn_fixtures::DEFAULT_BASE_URL.to_owned()
    }

    /// Default points file.
    pub fn points() -> PathBuf {
        PathBuf::from("points.jsonl")
    }

    /// Default targets file.
    pub fn targets() -> PathBuf {
        PathBuf::from("targets.jsonl")
    }
}
