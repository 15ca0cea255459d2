//! Final asset selection: optional AI override over the rule classifier.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    ai::AssetSuggester,
    catalog::AssetId,
    classify::{ClassificationInput, ClassificationResult, RuleClassifier},
};

/// Composes a [`RuleClassifier`] with an optional [`AssetSuggester`].
///
/// The rule path is both the default and the safety net, so every call
/// yields exactly one asset.
#[derive(Clone, Default)]
pub struct Selector {
    classifier: RuleClassifier,
    suggester: Option<Arc<dyn AssetSuggester>>,
}

impl Selector {
    pub fn new(classifier: RuleClassifier) -> Self {
        Self {
            classifier,
            suggester: None,
        }
    }

    pub fn with_suggester(mut self, suggester: Arc<dyn AssetSuggester>) -> Self {
        self.suggester = Some(suggester);
        self
    }

    pub fn classifier(&self) -> &RuleClassifier {
        &self.classifier
    }

    pub fn has_suggester(&self) -> bool {
        self.suggester.is_some()
    }

    /// Rule-path view with provenance; never consults the AI.
    pub fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        self.classifier.classify(input)
    }

    pub async fn select(&self, input: &ClassificationInput, use_ai: bool) -> AssetId {
        self.select_detailed(input, use_ai).await.asset
    }

    /// Like [`Selector::select`] but keeps the provenance.
    #[instrument(skip_all, fields(use_ai = use_ai))]
    pub async fn select_detailed(
        &self,
        input: &ClassificationInput,
        use_ai: bool,
    ) -> ClassificationResult {
        if use_ai && input.is_complete() {
            if let Some(suggester) = &self.suggester {
                if let Some(asset) = suggester.suggest(input).await {
                    debug!(%asset, "using ai override");
                    return ClassificationResult::ai_override(asset);
                }
            }
        }
        self.classifier.classify(input)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::classify::Provenance;

    struct Fixed {
        answer: Option<AssetId>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(answer: Option<AssetId>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AssetSuggester for Fixed {
        async fn suggest(&self, _input: &ClassificationInput) -> Option<AssetId> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    #[tokio::test]
    async fn ai_answer_overrides_rules() {
        let fixed = Fixed::new(Some(AssetId::Liver));
        let selector = Selector::default().with_suggester(fixed.clone());
        let input = ClassificationInput::new("Elevated HbA1c.", &["Type 2 Diabetes Mellitus"]);
        let result = selector.select_detailed(&input, true).await;
        assert_eq!(result.asset, AssetId::Liver);
        assert_eq!(result.provenance, Provenance::AiOverride);
        assert_eq!(fixed.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ai_is_skipped_when_disabled_or_input_incomplete() {
        let fixed = Fixed::new(Some(AssetId::Liver));
        let selector = Selector::default().with_suggester(fixed.clone());

        let full = ClassificationInput::new("Elevated HbA1c.", &["Type 2 Diabetes Mellitus"]);
        assert_eq!(selector.select(&full, false).await, AssetId::Pancreas);

        let no_dx = ClassificationInput::new("Chest pain, exertional.", &[]);
        assert_eq!(selector.select(&no_dx, true).await, AssetId::Heart);

        assert_eq!(fixed.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn silent_ai_falls_through_to_rules() {
        let selector = Selector::default().with_suggester(Fixed::new(None));
        let input = ClassificationInput::new("Wheezing.", &["Asthma exacerbation"]);
        let result = selector.select_detailed(&input, true).await;
        assert_eq!(result, selector.classify(&input));
        assert_eq!(result.provenance, Provenance::DiagnosisMatch);
    }

    #[tokio::test]
    async fn no_suggester_uses_rules() {
        let selector = Selector::default();
        assert!(!selector.has_suggester());
        let input = ClassificationInput::new("", &[]);
        assert_eq!(selector.select(&input, true).await, AssetId::FallbackUncertain);
    }
}
