//! CLI entry-point for the rule classifier's debug view.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use super::TextArgs;
use crate::{classify::RuleClassifier, config::Settings};

/// Args for the `classify` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub text: TextArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let classifier = RuleClassifier::new(settings.catalog()?);
    let result = classifier.classify(&args.text.into_input());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
