//! Deterministic rule-based routing of clinical text to a visualization asset.

mod input;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    catalog::{AssetId, Catalog},
    nlp::{
        contains,
        pain::{self, PainCue, SitePain},
        NormalizedText,
    },
};

pub use input::ClassificationInput;

/// Which pipeline stage produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    DiagnosisMatch,
    SummaryMatch,
    RegionMatch,
    ContextualPainMatch,
    AiOverride,
    Fallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::DiagnosisMatch => "diagnosis-match",
            Provenance::SummaryMatch => "summary-match",
            Provenance::RegionMatch => "region-match",
            Provenance::ContextualPainMatch => "contextual-pain-match",
            Provenance::AiOverride => "ai-override",
            Provenance::Fallback => "fallback",
        }
    }
}

/// Asset plus the stage and phrase that selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub asset: AssetId,
    pub provenance: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl ClassificationResult {
    fn new(asset: AssetId, provenance: Provenance, matched: impl Into<String>) -> Self {
        Self {
            asset,
            provenance,
            matched: Some(matched.into()),
        }
    }

    pub fn fallback(asset: AssetId) -> Self {
        Self {
            asset,
            provenance: Provenance::Fallback,
            matched: None,
        }
    }

    pub fn ai_override(asset: AssetId) -> Self {
        Self {
            asset,
            provenance: Provenance::AiOverride,
            matched: None,
        }
    }
}

/// Pure, synchronous classifier over an immutable catalog.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    catalog: Arc<Catalog>,
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl RuleClassifier {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run the staged pipeline. The first stage to match ends the call; an
    /// unmatched input resolves to the catalog fallback.
    pub fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        let text = NormalizedText::new(input.summary(), input.diagnoses());
        if text.is_empty() {
            debug!("empty input, using fallback");
            return ClassificationResult::fallback(self.catalog.fallback());
        }

        let result = self
            .diagnosis_match(&text)
            .or_else(|| self.summary_match(&text))
            .or_else(|| self.region_match(&text))
            .or_else(|| self.limb_pain_match(&text))
            .or_else(|| self.site_pain_match(&text))
            .unwrap_or_else(|| ClassificationResult::fallback(self.catalog.fallback()));

        debug!(
            asset = %result.asset,
            provenance = result.provenance.as_str(),
            matched = result.matched.as_deref().unwrap_or(""),
            "classified"
        );
        result
    }

    fn diagnosis_match(&self, text: &NormalizedText) -> Option<ClassificationResult> {
        text.diagnoses().iter().find_map(|diagnosis| {
            self.catalog
                .organ_rules()
                .find(|rule| contains(diagnosis, &rule.phrase))
                .map(|rule| {
                    ClassificationResult::new(rule.asset, Provenance::DiagnosisMatch, &rule.phrase)
                })
        })
    }

    fn summary_match(&self, text: &NormalizedText) -> Option<ClassificationResult> {
        self.catalog
            .organ_rules()
            .find(|rule| contains(text.summary(), &rule.phrase))
            .map(|rule| {
                ClassificationResult::new(rule.asset, Provenance::SummaryMatch, &rule.phrase)
            })
    }

    fn region_match(&self, text: &NormalizedText) -> Option<ClassificationResult> {
        self.catalog
            .region_rules()
            .find(|rule| text.any_contains(&rule.phrase))
            .map(|rule| {
                ClassificationResult::new(rule.asset, Provenance::RegionMatch, &rule.phrase)
            })
    }

    fn limb_pain_match(&self, text: &NormalizedText) -> Option<ClassificationResult> {
        let hit = pain::limb_pain(text)?;
        let asset = match hit.limb {
            pain::Limb::Hand => AssetId::RegionHand,
            pain::Limb::Leg => AssetId::RegionLeg,
        };
        let matched = match hit.cue {
            PainCue::Literal => format!("{} pain", hit.token),
            PainCue::Synonym(word) => format!("{} + {word}", hit.token),
            PainCue::Localized => format!("{} + localized", hit.token),
        };
        Some(ClassificationResult::new(
            asset,
            Provenance::ContextualPainMatch,
            matched,
        ))
    }

    fn site_pain_match(&self, text: &NormalizedText) -> Option<ClassificationResult> {
        let result = match pain::site_pain(text)? {
            SitePain::Stomach(hint) => {
                ClassificationResult::new(AssetId::Stomach, Provenance::ContextualPainMatch, hint)
            }
            SitePain::Intestines(hint) => ClassificationResult::new(
                AssetId::Intestines,
                Provenance::ContextualPainMatch,
                hint,
            ),
            SitePain::AbdominalUndetermined(phrase) => {
                ClassificationResult::new(self.catalog.fallback(), Provenance::Fallback, phrase)
            }
            SitePain::Cardiac(hint) => ClassificationResult::new(
                self.catalog.cardiac(),
                Provenance::ContextualPainMatch,
                hint,
            ),
            SitePain::Respiratory(hint) => {
                ClassificationResult::new(AssetId::Lungs, Provenance::ContextualPainMatch, hint)
            }
        };
        Some(result)
    }
}
