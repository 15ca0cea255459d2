//! CLI entry-point for asset selection.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use super::TextArgs;
use crate::config::Settings;

/// Args for the `select` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub text: TextArgs,
    /// Skip the AI override even when credentials are configured.
    #[arg(long)]
    pub no_ai: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let selector = settings.selector()?;
    let use_ai = settings.use_ai && !args.no_ai;
    let result = selector
        .select_detailed(&args.text.into_input(), use_ai)
        .await;
    info!(asset = %result.asset, provenance = result.provenance.as_str(), "selected");
    println!("{}", result.asset);
    Ok(())
}
