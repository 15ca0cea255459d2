//! CLI entry-point for resolving assets over a batch of stored reports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    report::{self, Report},
};

/// Args for the `resolve` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// JSONL file, one report object per line.
    #[arg(long)]
    pub input: PathBuf,
    /// Reports resolved concurrently.
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,
    /// Skip the AI override even when credentials are configured.
    #[arg(long)]
    pub no_ai: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("reading {}", args.input.display()))?;
    let mut reports = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Report>(line) {
            Ok(report) => reports.push(report),
            Err(err) => warn!(line = idx + 1, error = %err, "skipping report"),
        }
    }

    let selector = settings.selector()?;
    let use_ai = settings.use_ai && !args.no_ai;
    info!(reports = reports.len(), use_ai, "resolving reports");

    let resolved = stream::iter(reports)
        .map(|report| {
            let selector = selector.clone();
            async move {
                let outcome = report::resolve_report(&selector, &report, use_ai).await;
                (report.summary_id, outcome)
            }
        })
        .buffered(args.concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut skipped = 0usize;
    for (summary_id, outcome) in resolved {
        let id = summary_id.unwrap_or_else(|| "-".to_string());
        match outcome {
            Ok(asset) => println!("{id}\t{asset}"),
            Err(err) => {
                skipped += 1;
                warn!(summary_id = %id, error = %err, "skipping report");
            }
        }
    }
    if skipped > 0 {
        warn!(skipped, "some reports could not be resolved");
    }
    Ok(())
}
