//! Binary confusion matrix for prediction quality scoring.

use std::fmt;

use crate::predict::Class;

/// Counts of true/false positives/negatives over a batch of
/// (predicted, actual) pairs. Risk is the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConfusionMatrix {
    true_positives: usize,
    true_negatives: usize,
    false_positives: usize,
    false_negatives: usize,
}

impl ConfusionMatrix {
    /// Accumulate a matrix from (predicted, actual) class pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(Class, Class)]) -> Self {
        let mut matrix = Self::default();
        for &(predicted, actual) in pairs {
            matrix.record(predicted, actual);
        }
        matrix
    }

    /// Record a single (predicted, actual) outcome.
    pub fn record(&mut self, predicted: Class, actual: Class) {
        match (predicted, actual) {
            (Class::Risk, Class::Risk) => self.true_positives += 1,
            (Class::Normal, Class::Normal) => self.true_negatives += 1,
            (Class::Risk, Class::Normal) => self.false_positives += 1,
            (Class::Normal, Class::Risk) => self.false_negatives += 1,
        }
    }

    /// Risk readings correctly predicted as risk.
    #[must_use]
    pub fn true_positives(&self) -> usize {
        self.true_positives
    }

    /// Normal readings correctly predicted as normal.
    #[must_use]
    pub fn true_negatives(&self) -> usize {
        self.true_negatives
    }

    /// Normal readings incorrectly predicted as risk.
    #[must_use]
    pub fn false_positives(&self) -> usize {
        self.false_positives
    }

    /// Risk readings incorrectly predicted as normal.
    #[must_use]
    pub fn false_negatives(&self) -> usize {
        self.false_negatives
    }

    /// Total number of recorded pairs.
    #[must_use]
    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>11} {:>9}", "", "pred_normal", "pred_risk")?;
        writeln!(
            f,
            "{:>12} {:>11} {:>9}",
            "true_normal", self.true_negatives, self.false_positives
        )?;
        writeln!(
            f,
            "{:>12} {:>11} {:>9}",
            "true_risk", self.false_negatives, self.true_positives
        )
    }
}
