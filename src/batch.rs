//! Batch classification.
//!
//! Runs one [`CardClassifier`] over many inputs. The rule table is shared
//! read-only, so the `parallel` feature can fan work out with rayon without
//! any locking.

use crate::classifier::{CardClassifier, ClassificationResult};
use crate::error::ClassifyError;

/// Classifies many card numbers with a single classifier.
///
/// # Example
///
/// ```
/// use card_classifier::BatchClassifier;
///
/// let batch = BatchClassifier::default();
/// let cards = ["4111111111111111", "371449635398431", "not a card"];
/// let results = batch.classify_all(&cards);
///
/// assert!(results[0].valid);
/// assert!(results[1].valid);
/// assert!(!results[2].valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchClassifier {
    classifier: CardClassifier,
}

impl BatchClassifier {
    /// Wraps a configured classifier.
    pub fn new(classifier: CardClassifier) -> Self {
        Self { classifier }
    }

    /// The underlying classifier.
    #[inline]
    pub fn classifier(&self) -> &CardClassifier {
        &self.classifier
    }

    /// Classifies every input, preserving order.
    pub fn classify_all<S: AsRef<str>>(&self, cards: &[S]) -> Vec<ClassificationResult> {
        cards
            .iter()
            .map(|c| self.classifier.classify(c.as_ref()))
            .collect()
    }

    /// Returns only the valid results.
    pub fn classify_valid_only<S: AsRef<str>>(&self, cards: &[S]) -> Vec<ClassificationResult> {
        cards
            .iter()
            .map(|c| self.classifier.classify(c.as_ref()))
            .filter(|r| r.valid)
            .collect()
    }

    /// Splits results into valid ones and `(index, error)` failures.
    pub fn partition<S: AsRef<str>>(
        &self,
        cards: &[S],
    ) -> (Vec<ClassificationResult>, Vec<(usize, ClassifyError)>) {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for (i, card) in cards.iter().enumerate() {
            let result = self.classifier.classify(card.as_ref());
            match result.error() {
                Some(err) => invalid.push((i, err.clone())),
                None => valid.push(result),
            }
        }

        (valid, invalid)
    }

    /// Counts valid and invalid inputs: `(valid, invalid)`.
    pub fn count_valid<S: AsRef<str>>(&self, cards: &[S]) -> (usize, usize) {
        let valid = cards
            .iter()
            .filter(|c| self.classifier.classify(c.as_ref()).valid)
            .count();
        (valid, cards.len() - valid)
    }

    /// Classifies every input in parallel, preserving order.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn classify_parallel<S: AsRef<str> + Sync>(&self, cards: &[S]) -> Vec<ClassificationResult> {
        use rayon::prelude::*;
        cards
            .par_iter()
            .map(|c| self.classifier.classify(c.as_ref()))
            .collect()
    }

    /// Counts valid and invalid inputs in parallel.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn count_valid_parallel<S: AsRef<str> + Sync>(&self, cards: &[S]) -> (usize, usize) {
        use rayon::prelude::*;
        let valid = cards
            .par_iter()
            .filter(|c| self.classifier.classify(c.as_ref()).valid)
            .count();
        (valid, cards.len() - valid)
    }
}

/// Classifies a slice with the default classifier.
///
/// # Example
///
/// ```
/// use card_classifier::batch::classify_batch;
///
/// let results = classify_batch(&["4111111111111111", "6011000000000004"]);
/// assert!(results.iter().all(|r| r.valid));
/// ```
pub fn classify_batch<S: AsRef<str>>(cards: &[S]) -> Vec<ClassificationResult> {
    BatchClassifier::default().classify_all(cards)
}

/// Counts valid and invalid inputs with the default classifier.
pub fn count_valid<S: AsRef<str>>(cards: &[S]) -> (usize, usize) {
    BatchClassifier::default().count_valid(cards)
}
