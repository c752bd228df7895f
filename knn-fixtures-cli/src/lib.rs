//! # KNN Fixtures CLI
//!
//! This library provides basic functionality for the KNN fixtures CLI.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, reason = "Dependencies")]

pub mod commands;
mod config;

use anyhow::Result;
use argh::FromArgs;
use commands::Command;
pub use config::{parse_config, Config};
use log::{debug, info, warn};

/// 🧪 Fake KNN routing datasets.
#[derive(FromArgs, Debug)]
#[argh(help_triggers("-h", "--help"))]
pub struct Args {
    /// the command to execute.
    #[argh(subcommand)]
    pub command: Command,
}

/// Execute the command.
///
/// # Errors
///
/// Returns an error if embedding, reading or writing fails.
#[allow(clippy::future_not_send, reason = "Main function")]
pub async fn execute(command: Command, config: Config) -> Result<()> {
    debug!("Executing command: {:?}", command);
    debug!("Output: {:?}", config.output);

    match command {
        Command::Generate(generate) => {
            info!("Generating dataset...");
            let summary = generate.execute(config).await?;
            info!("Generating complete!");
            info!(
                "Summary: {} point(s), {} target(s), {}-dimensional embeddings. 📝",
                summary.points, summary.targets, summary.dimension
            );
        }
        Command::Check(check) => {
            let summary = check.execute(config)?;
            if summary.points == 0 {
                warn!("No points found. 🗑️");
            }
            println!("{} point(s), {} target(s)", summary.points, summary.targets);
            for (category, count) in &summary.categories {
                println!("category {category}: {count}");
            }
            for (label, count) in &summary.labels {
                println!("target {label}: {count}");
            }
            if summary.unscored > 0 {
                warn!("{} point(s) without any target", summary.unscored);
            }
        }
    };

    Ok(())
}
