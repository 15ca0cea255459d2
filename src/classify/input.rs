use serde::{Deserialize, Serialize};

use crate::error::{RouterError, RouterResult};

/// Immutable `(summary, diagnoses)` pair. Empty values are valid; absent
/// values are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInput")]
pub struct ClassificationInput {
    #[serde(rename = "summary_text")]
    summary: String,
    diagnoses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    #[serde(default)]
    summary_text: Option<String>,
    #[serde(default)]
    diagnoses: Option<Vec<String>>,
}

impl TryFrom<RawInput> for ClassificationInput {
    type Error = RouterError;

    fn try_from(raw: RawInput) -> Result<Self, Self::Error> {
        Self::try_from_parts(raw.summary_text, raw.diagnoses)
    }
}

impl ClassificationInput {
    pub fn new(summary: &str, diagnoses: &[&str]) -> Self {
        Self::from_parts(
            summary.to_string(),
            diagnoses.iter().map(|d| d.to_string()).collect(),
        )
    }

    pub fn from_parts(summary: String, diagnoses: Vec<String>) -> Self {
        Self { summary, diagnoses }
    }

    /// Boundary constructor for callers that may hold absent values.
    pub fn try_from_parts(
        summary: Option<String>,
        diagnoses: Option<Vec<String>>,
    ) -> RouterResult<Self> {
        let summary = summary
            .ok_or_else(|| RouterError::InvalidInput("summary_text must not be null".into()))?;
        let diagnoses = diagnoses
            .ok_or_else(|| RouterError::InvalidInput("diagnoses must not be null".into()))?;
        Ok(Self::from_parts(summary, diagnoses))
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn diagnoses(&self) -> &[String] {
        &self.diagnoses
    }

    /// Both the summary and the diagnosis list carry content.
    pub fn is_complete(&self) -> bool {
        !self.summary.trim().is_empty() && self.diagnoses.iter().any(|d| !d.trim().is_empty())
    }
}
