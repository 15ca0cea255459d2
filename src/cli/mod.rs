//! Command-line interface wiring for medora-router.

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::{classify::ClassificationInput, config::Settings};

pub mod catalog;
pub mod classify;
pub mod resolve;
pub mod select;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Clinical text routing engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Classify(args) => classify::run(args, settings).await,
            Commands::Select(args) => select::run(args, settings).await,
            Commands::Resolve(args) => resolve::run(args, settings).await,
            Commands::Catalog => catalog::run(settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the rule classifier and print the result with provenance.
    Classify(classify::Args),
    /// Select the visualization asset, consulting the AI when configured.
    Select(select::Args),
    /// Resolve assets for a JSONL file of stored reports.
    Resolve(resolve::Args),
    /// Print the active keyword catalog as JSON.
    Catalog,
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// Clinical text shared by `classify` and `select`.
#[derive(Debug, Clone, ClapArgs)]
pub struct TextArgs {
    /// Free-text clinical summary.
    #[arg(long, default_value = "")]
    pub summary: String,
    /// Diagnosis label; repeat for several, in priority order.
    #[arg(long = "diagnosis")]
    pub diagnoses: Vec<String>,
}

impl TextArgs {
    pub fn into_input(self) -> ClassificationInput {
        ClassificationInput::from_parts(self.summary, self.diagnoses)
    }
}
