//! Runtime configuration utilities for medora-router.

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    ai::{self, AiSettings, GeminiSuggester},
    catalog::Catalog,
    classify::RuleClassifier,
    select::Selector,
};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Text-generation endpoint and credentials for the AI override.
    pub ai: AiSettings,
    /// Whether `select` consults the AI when credentials are present.
    pub use_ai: bool,
    /// Alternate keyword catalog; the builtin table is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = non_blank("AI_API_KEY").or_else(|| non_blank("GEMINI_API_KEY"));
        let endpoint =
            non_blank("AI_ENDPOINT").unwrap_or_else(|| ai::DEFAULT_ENDPOINT.to_string());
        let model = non_blank("AI_MODEL").unwrap_or_else(|| ai::DEFAULT_MODEL.to_string());
        let timeout = match non_blank("AI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("AI_TIMEOUT_SECS must be whole seconds, got `{raw}`"))?;
                Duration::from_secs(secs)
            }
            None => ai::DEFAULT_TIMEOUT,
        };
        let use_ai = non_blank("USE_AI")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);
        let catalog_path = non_blank("CATALOG_PATH").map(PathBuf::from);

        Ok(Self {
            ai: AiSettings {
                api_key,
                endpoint,
                model,
                timeout,
            },
            use_ai,
            catalog_path,
        })
    }

    /// The configured catalog, or the builtin one.
    pub fn catalog(&self) -> anyhow::Result<Arc<Catalog>> {
        match &self.catalog_path {
            Some(path) => Ok(Arc::new(Catalog::load(path)?)),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Wire a selector from these settings. The AI override is attached only
    /// when credentials are present.
    pub fn selector(&self) -> anyhow::Result<Selector> {
        let catalog = self.catalog()?;
        let mut selector = Selector::new(RuleClassifier::new(Arc::clone(&catalog)));
        if self.ai.has_credentials() {
            let suggester = GeminiSuggester::new(self.ai.clone(), catalog)
                .context("building AI client")?;
            selector = selector.with_suggester(Arc::new(suggester));
        }
        Ok(selector)
    }
}

fn non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
