//! Gemini `generateContent` client used as the AI override.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::{prompt, AiSettings, AssetSuggester};
use crate::{
    catalog::{AssetId, Catalog},
    classify::ClassificationInput,
};

const MAX_OUTPUT_TOKENS: u32 = 16;

#[derive(Debug, Error)]
enum SuggestError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response had no candidate text")]
    Empty,
    #[error("answer `{0}` is not an allowed token")]
    Unrecognized(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .find(|text| !text.trim().is_empty())
    }
}

/// Suggests assets by asking a Gemini model. The HTTP client is reused
/// across calls; each call is independent and never retried.
#[derive(Debug, Clone)]
pub struct GeminiSuggester {
    settings: AiSettings,
    catalog: Arc<Catalog>,
    client: Client,
}

impl GeminiSuggester {
    pub fn new(settings: AiSettings, catalog: Arc<Catalog>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent("medora-router/0.1")
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            settings,
            catalog,
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.settings.model)
        )
    }

    async fn request(
        &self,
        api_key: &str,
        input: &ClassificationInput,
    ) -> Result<AssetId, SuggestError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt::build_prompt(input, &self.catalog),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SuggestError::Status { status, body });
        }

        let payload: GenerateResponse = resp.json().await?;
        let text = payload.first_text().ok_or(SuggestError::Empty)?;
        debug!(answer = %text.trim(), "model replied");
        prompt::parse_answer(&text)
            .ok_or_else(|| SuggestError::Unrecognized(text.trim().to_string()))
    }
}

#[async_trait]
impl AssetSuggester for GeminiSuggester {
    #[instrument(skip_all, fields(model = %self.settings.model))]
    async fn suggest(&self, input: &ClassificationInput) -> Option<AssetId> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())?;

        let timeout = self.settings.timeout;
        let outcome = match tokio::time::timeout(timeout, self.request(api_key, input)).await {
            Ok(result) => result,
            Err(_) => Err(SuggestError::Timeout(timeout)),
        };
        match outcome {
            Ok(asset) => {
                debug!(%asset, "ai suggestion accepted");
                Some(asset)
            }
            Err(err) => {
                warn!(error = %err, "ai suggestion unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_skips_empty_candidates() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{ "candidates": [
                { "content": { "parts": [ { "text": "  " } ] } },
                { "finishReason": "SAFETY" },
                { "content": { "parts": [ { "text": "kidneys" } ] } }
            ] }"#,
        )
        .unwrap();
        assert_eq!(payload.first_text().as_deref(), Some("kidneys"));
    }

    #[test]
    fn missing_candidates_parse_as_empty() {
        let payload: GenerateResponse =
            serde_json::from_str(r#"{ "promptFeedback": {} }"#).unwrap();
        assert!(payload.first_text().is_none());
    }

    #[test]
    fn request_body_uses_camel_case() {
        let body = GenerateRequest {
            contents: vec![],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 16);
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let settings = AiSettings {
            endpoint: "http://localhost:9000/v1beta/".into(),
            model: "gemini-test".into(),
            ..AiSettings::default()
        };
        let suggester = GeminiSuggester::new(settings, Catalog::builtin()).unwrap();
        assert_eq!(
            suggester.url(),
            "http://localhost:9000/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn no_credentials_answers_none_immediately() {
        let suggester = GeminiSuggester::new(AiSettings::default(), Catalog::builtin()).unwrap();
        let input = ClassificationInput::new("chest pain", &["angina"]);
        assert_eq!(suggester.suggest(&input).await, None);
    }
}
