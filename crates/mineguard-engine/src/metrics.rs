//! Quality metrics derived from the confusion matrix.

use crate::confusion::ConfusionMatrix;
use crate::predict::Class;

/// Classification quality summary. All values are percentages in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metrics {
    /// Share of correct predictions.
    pub accuracy: f64,
    /// Share of risk predictions that were actually risk.
    pub precision: f64,
    /// Share of actual risk cases that were predicted as risk.
    pub recall: f64,
    /// Harmonic mean of the percentage-scaled precision and recall.
    pub f1: f64,
}

impl Metrics {
    /// Derive metrics from an accumulated confusion matrix.
    ///
    /// Zero denominators yield 0 rather than dividing by zero. Precision
    /// and recall are already on the 0-100 scale when the F1 harmonic
    /// mean is taken; consumers of these metrics expect that scaling.
    #[must_use]
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let tp = matrix.true_positives() as f64;
        let tn = matrix.true_negatives() as f64;
        let fp = matrix.false_positives() as f64;
        let fn_ = matrix.false_negatives() as f64;

        let total = tp + tn + fp + fn_;
        let accuracy = if total > 0.0 {
            (tp + tn) / total * 100.0
        } else {
            0.0
        };
        let precision = if tp + fp > 0.0 {
            tp / (tp + fp) * 100.0
        } else {
            0.0
        };
        let recall = if tp + fn_ > 0.0 {
            tp / (tp + fn_) * 100.0
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// Score a batch of (predicted, actual) pairs.
#[must_use]
pub fn evaluate_predictions(pairs: &[(Class, Class)]) -> Metrics {
    Metrics::from_confusion(&ConfusionMatrix::from_pairs(pairs))
}
