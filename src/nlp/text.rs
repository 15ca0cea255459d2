//! Case folding and substring search over clinical text.

/// Lower-case `s`. Whitespace and punctuation are left untouched.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
}

/// Plain substring containment; callers normalize both sides first.
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// Normalized view of one classification request.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    summary: String,
    diagnoses: Vec<String>,
}

impl NormalizedText {
    pub fn new(summary: &str, diagnoses: &[String]) -> Self {
        Self {
            summary: normalize(summary),
            diagnoses: diagnoses.iter().map(|d| normalize(d)).collect(),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn diagnoses(&self) -> &[String] {
        &self.diagnoses
    }

    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.diagnoses.iter().all(|d| d.trim().is_empty())
    }

    /// Summary first, then each diagnosis in caller order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.summary.as_str()).chain(self.diagnoses.iter().map(String::as_str))
    }

    pub fn any_contains(&self, needle: &str) -> bool {
        self.texts().any(|text| contains(text, needle))
    }

    pub fn summary_contains_any(&self, needles: &[&'static str]) -> Option<&'static str> {
        needles
            .iter()
            .copied()
            .find(|needle| contains(&self.summary, needle))
    }

    pub fn diagnoses_contain_any(&self, needles: &[&'static str]) -> Option<&'static str> {
        needles
            .iter()
            .copied()
            .find(|needle| self.diagnoses.iter().any(|d| contains(d, needle)))
    }
}
