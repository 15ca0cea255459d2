//! Entry point wiring CLI dispatch to the routing engine.

use anyhow::Result;
use medora_router::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(version = env!("CARGO_PKG_VERSION"), "starting command");
    cli.dispatch(settings).await
}
