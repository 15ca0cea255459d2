//! Stored clinical summary records and their routing.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    catalog::AssetId,
    classify::ClassificationInput,
    error::RouterResult,
    select::Selector,
};

/// Clinical summary record produced by the note-analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub summary_id: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub summary_text: Option<String>,
    #[serde(default)]
    pub diagnoses: Option<Vec<String>>,
    #[serde(default)]
    pub affected_system: Option<String>,
    #[serde(default)]
    pub affected_organ: Option<String>,
    /// Asset chosen upstream; when it names a catalog asset routing is skipped.
    #[serde(default)]
    pub animation_asset: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Classification input for this report; absent text or diagnoses are
    /// rejected.
    pub fn input(&self) -> RouterResult<ClassificationInput> {
        ClassificationInput::try_from_parts(self.summary_text.clone(), self.diagnoses.clone())
    }

    /// The upstream asset, if it names a catalog id either bare (`lungs`) or
    /// as an asset path (`assets/videos/lungs.mp4`).
    pub fn precomputed_asset(&self) -> Option<AssetId> {
        let raw = self.animation_asset.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse().ok().or_else(|| {
            Path::new(raw)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse().ok())
        })
    }
}

/// Resolve the asset to display for a report.
pub async fn resolve_report(
    selector: &Selector,
    report: &Report,
    use_ai: bool,
) -> RouterResult<AssetId> {
    if let Some(asset) = report.precomputed_asset() {
        debug!(summary_id = ?report.summary_id, %asset, "using precomputed asset");
        return Ok(asset);
    }
    let input = report.input()?;
    Ok(selector.select(&input, use_ai).await)
}
