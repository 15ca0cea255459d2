//! Keyword catalog mapping clinical phrases to visualization assets.

mod builtin;

use std::{fmt, path::Path, str::FromStr, sync::Arc};

use anyhow::Context;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{RouterError, RouterResult},
    nlp::text,
};

/// Visualization asset identifiers. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetId {
    Heart,
    Brain,
    Lungs,
    Liver,
    Pancreas,
    Kidneys,
    Stomach,
    Intestines,
    BloodVessels,
    NervousSystem,
    RegionHand,
    RegionLeg,
    FallbackUncertain,
}

impl AssetId {
    pub const ALL: [AssetId; 13] = [
        AssetId::Heart,
        AssetId::Brain,
        AssetId::Lungs,
        AssetId::Liver,
        AssetId::Pancreas,
        AssetId::Kidneys,
        AssetId::Stomach,
        AssetId::Intestines,
        AssetId::BloodVessels,
        AssetId::NervousSystem,
        AssetId::RegionHand,
        AssetId::RegionLeg,
        AssetId::FallbackUncertain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetId::Heart => "heart",
            AssetId::Brain => "brain",
            AssetId::Lungs => "lungs",
            AssetId::Liver => "liver",
            AssetId::Pancreas => "pancreas",
            AssetId::Kidneys => "kidneys",
            AssetId::Stomach => "stomach",
            AssetId::Intestines => "intestines",
            AssetId::BloodVessels => "blood_vessels",
            AssetId::NervousSystem => "nervous_system",
            AssetId::RegionHand => "region_hand",
            AssetId::RegionLeg => "region_leg",
            AssetId::FallbackUncertain => "fallback_uncertain",
        }
    }

    pub fn is_region(&self) -> bool {
        matches!(self, AssetId::RegionHand | AssetId::RegionLeg)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetId {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        AssetId::ALL
            .into_iter()
            .find(|asset| asset.as_str() == key)
            .ok_or_else(|| RouterError::Catalog(format!("unknown asset id `{}`", s.trim())))
    }
}

/// Priority class of a keyword rule. Organ rules are always evaluated first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Organ,
    Region,
}

/// A single `(phrase, asset, tier)` entry. Phrases are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub phrase: String,
    pub asset: AssetId,
    pub tier: Tier,
}

impl KeywordRule {
    pub fn new(phrase: &str, asset: AssetId, tier: Tier) -> Self {
        Self {
            phrase: text::normalize(phrase),
            asset,
            tier,
        }
    }
}

/// Immutable keyword table. Declaration order is the tie-break: within a
/// tier the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    rules: Vec<KeywordRule>,
    fallback: AssetId,
    cardiac: AssetId,
}

/// On-disk representation of an alternate catalog.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_fallback")]
    fallback: AssetId,
    #[serde(default = "default_cardiac")]
    cardiac: AssetId,
    rules: Vec<KeywordRule>,
}

fn default_fallback() -> AssetId {
    AssetId::FallbackUncertain
}

fn default_cardiac() -> AssetId {
    AssetId::Heart
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| {
    let rules = builtin::RULES
        .iter()
        .map(|(phrase, asset, tier)| KeywordRule::new(phrase, *asset, *tier))
        .collect();
    Arc::new(Catalog {
        rules,
        fallback: default_fallback(),
        cardiac: default_cardiac(),
    })
});

impl Catalog {
    /// Build a catalog from explicit rules, validating the table.
    pub fn new(rules: Vec<KeywordRule>, fallback: AssetId, cardiac: AssetId) -> RouterResult<Self> {
        if rules.is_empty() {
            return Err(RouterError::Catalog("catalog has no rules".into()));
        }
        if cardiac.is_region() || cardiac == fallback {
            return Err(RouterError::Catalog(format!(
                "`{cardiac}` cannot be the cardiac asset"
            )));
        }
        let mut seen = std::collections::HashSet::new();
        let mut normalized = Vec::with_capacity(rules.len());
        for rule in rules {
            let phrase = text::normalize(rule.phrase.trim());
            if phrase.is_empty() {
                return Err(RouterError::Catalog(format!(
                    "empty phrase for asset `{}`",
                    rule.asset
                )));
            }
            if !seen.insert((phrase.clone(), rule.tier)) {
                return Err(RouterError::Catalog(format!(
                    "duplicate phrase `{phrase}` in {:?} tier",
                    rule.tier
                )));
            }
            normalized.push(KeywordRule {
                phrase,
                asset: rule.asset,
                tier: rule.tier,
            });
        }
        Ok(Self {
            rules: normalized,
            fallback,
            cardiac,
        })
    }

    /// Shared handle to the shipped catalog.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_json_str(raw: &str) -> RouterResult<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::new(file.rules, file.fallback, file.cardiac)
    }

    /// Load an alternate catalog from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        info!(path = %path.display(), rules = catalog.rules.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn organ_rules(&self) -> impl Iterator<Item = &KeywordRule> {
        self.rules.iter().filter(|rule| rule.tier == Tier::Organ)
    }

    pub fn region_rules(&self) -> impl Iterator<Item = &KeywordRule> {
        self.rules.iter().filter(|rule| rule.tier == Tier::Region)
    }

    /// The single "uncertain" asset, always a valid answer.
    pub fn fallback(&self) -> AssetId {
        self.fallback
    }

    /// Asset used for cardiac routing decisions (chest pain bias, exertional pain).
    pub fn cardiac(&self) -> AssetId {
        self.cardiac
    }

    /// Phrases grouped by asset, in first-declaration order.
    pub fn phrases_by_asset(&self) -> IndexMap<AssetId, Vec<&str>> {
        let mut grouped: IndexMap<AssetId, Vec<&str>> = IndexMap::new();
        for rule in &self.rules {
            grouped.entry(rule.asset).or_default().push(rule.phrase.as_str());
        }
        grouped
    }
}
