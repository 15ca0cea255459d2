//! CLI entry-point for dumping the active catalog.

use anyhow::Result;
use tracing::instrument;

use crate::config::Settings;

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let catalog = settings.catalog()?;
    println!("{}", serde_json::to_string_pretty(catalog.as_ref())?);
    Ok(())
}
