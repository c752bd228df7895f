//! Subcommands for the KNN Fixtures CLI.

mod check;
mod generate;

use argh::FromArgs;
pub use check::{Check, CheckSummary};
pub use generate::{Generate, GenerateSummary};

/// Possible commands.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand)]
pub enum Command {
    /// A generate command.
    Generate(generate::Generate),
    /// A check command.
    Check(check::Check),
}
