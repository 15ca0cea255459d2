//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::AssetId,
    classify::{ClassificationInput, Provenance},
};

/// Classification input plus per-request options. Null or missing text
/// fields fail deserialization through [`ClassificationInput`].
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(flatten)]
    pub input: ClassificationInput,
    /// Only honoured by `/select`.
    #[serde(default)]
    pub use_ai: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectDto {
    pub asset: AssetId,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveDto {
    pub summary_id: Option<String>,
    pub asset: AssetId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub ai_enabled: bool,
}
