//! Pain-phrase heuristics: limb pain detection and chest/abdominal
//! disambiguation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::{contains, NormalizedText};

const HAND_TOKENS: &[&str] = &["hand", "wrist", "finger", "arm"];
const LEG_TOKENS: &[&str] = &["leg", "knee", "ankle", "foot", "thigh", "lower limb"];
const PAIN_SYNONYMS: &[&str] = &["pain", "stiffness", "discomfort", "ache", "sore", "tenderness"];
const LOCALIZED: &str = "localized";

const ABDOMINAL_PAIN: &[&str] = &[
    "abdominal pain",
    "abdominal discomfort",
    "abdominal cramp",
    "stomach pain",
    "stomach ache",
    "stomachache",
    "belly pain",
    "belly ache",
    "epigastric pain",
];
const STOMACH_HINTS: &[&str] = &[
    "epigastric",
    "nausea",
    "vomiting",
    "indigestion",
    "postprandial",
    "upper abdominal",
];
const INTESTINE_HINTS: &[&str] = &[
    "diarrhea",
    "diarrhoea",
    "constipation",
    "bloating",
    "cramping",
    "lower abdominal",
    "periumbilical",
    "right lower quadrant",
    "left lower quadrant",
];

const CHEST_PAIN: &[&str] = &[
    "chest pain",
    "chest discomfort",
    "chest tightness",
    "chest pressure",
    "thoracic pain",
    "thoracic discomfort",
];
const CARDIAC_SUMMARY_HINTS: &[&str] = &[
    "exertional",
    "worse on exertion",
    "heart",
    "cardiac",
    "acs",
    "nstemi",
    "stemi",
    "angina",
    "myocardial",
    "ischemia",
];
const CARDIAC_DIAGNOSIS_HINTS: &[&str] = &["cardiac", "acs", "nstemi", "stemi", "angina"];
const RESPIRATORY_HINTS: &[&str] = &["lung", "respiratory", "pleuritic", "cough"];
const EXERTIONAL: &[&str] = &[
    "exertional",
    "worse on exertion",
    "worse with exertion",
    "on exertion",
];

/// Limb group a pain mention was attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limb {
    Hand,
    Leg,
}

/// Evidence that tied a limb token to pain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainCue {
    /// `"<token> pain"` or `"pain in <token>"` verbatim.
    Literal,
    /// Token plus one of the pain synonyms anywhere in the same text.
    Synonym(&'static str),
    /// Token plus the word "localized".
    Localized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbPain {
    pub limb: Limb,
    pub token: &'static str,
    pub cue: PainCue,
}

struct LimbGroup {
    limb: Limb,
    tokens: &'static [&'static str],
    mention: Regex,
    literal: Regex,
}

impl LimbGroup {
    fn new(limb: Limb, tokens: &'static [&'static str]) -> Self {
        let alternation = tokens
            .iter()
            .map(|token| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|");
        let mention = Regex::new(&format!(r"\b({alternation})s?\b")).expect("valid regex");
        let literal = Regex::new(&format!(
            r"\b(?:({alternation})s? pain|pain in ({alternation})s?)\b"
        ))
        .expect("valid regex");
        Self {
            limb,
            tokens,
            mention,
            literal,
        }
    }

    fn token(&self, found: &str) -> Option<&'static str> {
        self.tokens.iter().copied().find(|token| *token == found)
    }

    fn find_literal(&self, text: &str) -> Option<&'static str> {
        let caps = self.literal.captures(text)?;
        let found = caps.get(1).or_else(|| caps.get(2))?.as_str();
        self.token(found)
    }

    fn find_token(&self, text: &str) -> Option<&'static str> {
        let found = self.mention.captures(text)?.get(1)?.as_str();
        self.token(found)
    }

    fn detect(&self, text: &str) -> Option<LimbPain> {
        if let Some(token) = self.find_literal(text) {
            return Some(self.hit(token, PainCue::Literal));
        }

        let token = self.find_token(text)?;
        if let Some(word) = pain_synonym(text) {
            return Some(self.hit(token, PainCue::Synonym(word)));
        }
        if contains(text, LOCALIZED) {
            return Some(self.hit(token, PainCue::Localized));
        }
        None
    }

    fn hit(&self, token: &'static str, cue: PainCue) -> LimbPain {
        LimbPain {
            limb: self.limb,
            token,
            cue,
        }
    }
}

static SYNONYM_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    PAIN_SYNONYMS
        .iter()
        .map(|word| {
            let pattern = Regex::new(&format!(r"\b{word}(?:s|ful|ness)?\b")).expect("valid regex");
            (*word, pattern)
        })
        .collect()
});

/// First pain synonym, in declaration order, present as a whole word.
fn pain_synonym(text: &str) -> Option<&'static str> {
    SYNONYM_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(word, _)| *word)
}

static LIMB_GROUPS: Lazy<[LimbGroup; 2]> = Lazy::new(|| {
    [
        LimbGroup::new(Limb::Hand, HAND_TOKENS),
        LimbGroup::new(Limb::Leg, LEG_TOKENS),
    ]
});

/// Look for hand pain across every text, then leg pain.
pub fn limb_pain(text: &NormalizedText) -> Option<LimbPain> {
    LIMB_GROUPS
        .iter()
        .find_map(|group| text.texts().find_map(|t| group.detect(t)))
}

/// Outcome of the chest/abdominal/exertional pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePain {
    Stomach(&'static str),
    Intestines(&'static str),
    /// Abdominal pain with no organ hint.
    AbdominalUndetermined(&'static str),
    Cardiac(&'static str),
    Respiratory(&'static str),
}

/// Disambiguate site-specific pain phrasing in the summary.
///
/// Abdominal pain is checked first. Chest pain prefers cardiac hints over
/// respiratory ones and defaults to cardiac when neither is present.
/// Exertional phrasing alone also counts as cardiac.
pub fn site_pain(text: &NormalizedText) -> Option<SitePain> {
    if let Some(phrase) = text.summary_contains_any(ABDOMINAL_PAIN) {
        if let Some(hint) = text.summary_contains_any(STOMACH_HINTS) {
            return Some(SitePain::Stomach(hint));
        }
        if let Some(hint) = text.summary_contains_any(INTESTINE_HINTS) {
            return Some(SitePain::Intestines(hint));
        }
        return Some(SitePain::AbdominalUndetermined(phrase));
    }

    if let Some(phrase) = text.summary_contains_any(CHEST_PAIN) {
        let cardiac = text
            .summary_contains_any(CARDIAC_SUMMARY_HINTS)
            .or_else(|| text.diagnoses_contain_any(CARDIAC_DIAGNOSIS_HINTS));
        if let Some(hint) = cardiac {
            return Some(SitePain::Cardiac(hint));
        }
        if let Some(hint) = text.summary_contains_any(RESPIRATORY_HINTS) {
            return Some(SitePain::Respiratory(hint));
        }
        return Some(SitePain::Cardiac(phrase));
    }

    text.summary_contains_any(EXERTIONAL).map(SitePain::Cardiac)
}
