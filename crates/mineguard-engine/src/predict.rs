//! Soft-voting prediction over the ensemble.

use std::fmt;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::trace;

use crate::ensemble::Ensemble;
use crate::error::{AggregationError, ClassifyError};
use crate::features::{build_features, FeatureVector, Observation};

/// The two prediction classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Class {
    /// Class 0: reading within the normal range.
    Normal,
    /// Class 1: reading indicates risk.
    Risk,
}

impl Class {
    /// Zero-based class index (0 = normal, 1 = risk).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Class::Normal => 0,
            Class::Risk => 1,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Normal => f.write_str("NORMAL"),
            Class::Risk => f.write_str("RIESGO"),
        }
    }
}

/// Qualitative band for a risk probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RiskLevel {
    /// Risk probability below 0.3.
    Low,
    /// Risk probability in [0.3, 0.7).
    Moderate,
    /// Risk probability of 0.7 or above.
    High,
}

impl RiskLevel {
    /// Band for a risk probability in [0, 1].
    #[must_use]
    pub fn from_probability(probability_risk: f64) -> Self {
        if probability_risk < 0.3 {
            Self::Low
        } else if probability_risk < 0.7 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("BAJO"),
            RiskLevel::Moderate => f.write_str("MODERADO"),
            RiskLevel::High => f.write_str("ALTO"),
        }
    }
}

/// Outcome of one ensemble prediction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredictionResult {
    /// Calibrated probability of the risk class, in [0, 1].
    pub probability_risk: f64,
    /// Complementary probability of the normal class.
    pub probability_normal: f64,
    /// Winning class under the strict `> 0.5` decision rule.
    pub predicted_class: Class,
    /// Number of trees whose leaf actually contributed to the vote.
    pub trees_used: usize,
}

impl PredictionResult {
    /// Qualitative band for this prediction's risk probability.
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_probability(self.probability_risk)
    }
}

impl Ensemble {
    /// Soft-voting prediction for a prepared feature vector.
    ///
    /// Every tree votes with its normalized leaf distribution. Trees that
    /// fail traversal are skipped and do not count toward `trees_used`.
    /// The surviving pairs are averaged elementwise and renormalized so
    /// the result sums to 1. The predicted class is `Risk` iff the risk
    /// probability strictly exceeds 0.5; a tie classifies as `Normal`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::NoUsableTrees`] when every tree failed.
    pub fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<PredictionResult, AggregationError> {
        let mut sum_normal = 0.0f64;
        let mut sum_risk = 0.0f64;
        let mut trees_used = 0usize;

        for (tree_index, tree) in self.trees.iter().enumerate() {
            match tree.evaluate(features) {
                Ok((p_normal, p_risk)) => {
                    sum_normal += p_normal;
                    sum_risk += p_risk;
                    trees_used += 1;
                }
                Err(err) => trace!(tree_index, %err, "tree skipped"),
            }
        }

        if trees_used == 0 {
            return Err(AggregationError::NoUsableTrees {
                n_trees: self.trees.len(),
            });
        }

        let n = trees_used as f64;
        let avg_normal = sum_normal / n;
        let avg_risk = sum_risk / n;

        // Each surviving pair sums to 1, but averaged floats drift.
        let total = avg_normal + avg_risk;
        let probability_normal = avg_normal / total;
        let probability_risk = avg_risk / total;

        let predicted_class = if probability_risk > 0.5 {
            Class::Risk
        } else {
            Class::Normal
        };

        Ok(PredictionResult {
            probability_risk,
            probability_normal,
            predicted_class,
            trees_used,
        })
    }

    /// Classify one raw observation: build features, then soft-vote.
    ///
    /// Pure and synchronous; identical inputs against the same ensemble
    /// produce identical results.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ClassifyError::Feature`] | non-finite value, or unknown sensor without an explicit code |
    /// | [`ClassifyError::Aggregation`] | no tree produced a usable leaf |
    pub fn classify(
        &self,
        value: f64,
        sensor_type: &str,
        explicit_code: Option<i64>,
    ) -> Result<PredictionResult, ClassifyError> {
        let features = build_features(value, sensor_type, explicit_code)?;
        Ok(self.predict_proba(&features)?)
    }

    /// Classify a batch of observations in parallel.
    ///
    /// Results preserve input order; each observation fails or succeeds on
    /// its own, so one bad record never blocks the rest of the batch.
    #[must_use]
    pub fn classify_batch(
        &self,
        observations: &[Observation],
    ) -> Vec<Result<PredictionResult, ClassifyError>> {
        observations
            .par_iter()
            .map(|obs| self.classify(obs.value, &obs.sensor_type, obs.type_code))
            .collect()
    }
}
