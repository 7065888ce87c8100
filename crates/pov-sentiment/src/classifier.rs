//! Threshold-based polarity labelling.

use std::sync::Arc;

use crate::scorer::{LexiconScorer, PolarityScorer};
use crate::types::{ClassifiedItem, Label, Thresholds};

/// Labels cleaned text as positive, negative, or neutral.
#[derive(Clone)]
pub struct Classifier {
    scorer: Arc<dyn PolarityScorer>,
    thresholds: Thresholds,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer), Thresholds::default())
    }
}

impl Classifier {
    #[must_use]
    pub fn new(scorer: Arc<dyn PolarityScorer>, thresholds: Thresholds) -> Self {
        Self { scorer, thresholds }
    }

    /// `score >= positive` is positive, `score <= negative` is negative.
    #[must_use]
    pub fn label_for(&self, score: f32) -> Label {
        if score >= self.thresholds.positive {
            Label::Positive
        } else if score <= self.thresholds.negative {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    #[must_use]
    pub fn classify(&self, text: String) -> ClassifiedItem {
        let score = self.scorer.score(&text).clamp(-1.0, 1.0);
        ClassifiedItem {
            label: self.label_for(score),
            text,
            score,
        }
    }

    #[must_use]
    pub fn classify_batch(&self, texts: Vec<String>) -> Vec<ClassifiedItem> {
        texts.into_iter().map(|text| self.classify(text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    struct FixedScorer(f32);

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> f32 {
            self.0
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        let classifier = Classifier::default();
        assert_eq!(classifier.label_for(0.2), Label::Positive);
        assert_eq!(classifier.label_for(-0.2), Label::Negative);
        assert_eq!(classifier.label_for(0.199), Label::Neutral);
        assert_eq!(classifier.label_for(-0.199), Label::Neutral);
        assert_eq!(classifier.label_for(0.0), Label::Neutral);
    }

    #[test]
    fn alternate_threshold_pair_is_respected() {
        let classifier = Classifier::new(
            Arc::new(LexiconScorer),
            Thresholds::new(0.1, -0.1).unwrap(),
        );
        assert_eq!(classifier.label_for(0.15), Label::Positive);
        assert_eq!(classifier.label_for(-0.15), Label::Negative);
    }

    #[test]
    fn out_of_range_scorer_output_is_clamped() {
        let classifier = Classifier::new(Arc::new(FixedScorer(3.0)), Thresholds::default());
        let item = classifier.classify("anything".to_string());
        assert_eq!(item.score, 1.0);
        assert_eq!(item.label, Label::Positive);
    }

    #[test]
    fn reshared_praise_classifies_positive() {
        let text = normalize("RT @joe: 😀😀 Great product!!   Love it");
        assert_eq!(text, "Great product!! Love it");
        let item = Classifier::default().classify(text);
        assert_eq!(item.label, Label::Positive);
    }

    #[test]
    fn batch_keeps_input_order() {
        let items = Classifier::default().classify_batch(vec![
            "terrible".to_string(),
            "fine day".to_string(),
            "excellent".to_string(),
        ]);
        let labels: Vec<Label> = items.iter().map(|i| i.label).collect();
        assert_eq!(labels, vec![Label::Negative, Label::Neutral, Label::Positive]);
    }
}
