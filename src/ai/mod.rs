//! Optional AI-assisted asset suggestion layered over the rule classifier.

pub mod gemini;
pub mod prompt;

use std::time::Duration;

use async_trait::async_trait;

use crate::{catalog::AssetId, classify::ClassificationInput};

pub use gemini::GeminiSuggester;

/// Default endpoint base for the Gemini `generateContent` API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of best-effort asset suggestions.
///
/// Implementations absorb every failure and answer `None`; the caller always
/// has the rule path to fall back on.
#[async_trait]
pub trait AssetSuggester: Send + Sync {
    async fn suggest(&self, input: &ClassificationInput) -> Option<AssetId>;
}

/// Credentials and endpoint configuration for the text-generation service.
#[derive(Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl AiSettings {
    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// The key never reaches logs.
impl std::fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
