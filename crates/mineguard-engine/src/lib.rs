//! Ensemble risk classification for mining-safety sensor readings.
//!
//! Runs a pre-trained decision-tree ensemble (a random-forest style model
//! exported as a JSON artifact) over raw sensor observations to classify
//! them as NORMAL or RIESGO, and scores batches of predictions against
//! ground-truth labels with confusion-matrix quality metrics.
//!
//! The ensemble is loaded once, is immutable afterwards, and may be shared
//! read-only across threads. Corruption is contained at the smallest
//! possible scope: a bad leaf votes neutral, a bad tree is omitted from
//! the vote, a bad observation is the only one that fails.

mod artifact;
mod confusion;
mod ensemble;
mod error;
mod features;
mod metrics;
mod node;
mod predict;
mod tree;

pub use confusion::ConfusionMatrix;
pub use ensemble::Ensemble;
pub use error::{AggregationError, ClassifyError, FeatureError, ModelError, TraversalError};
pub use features::{build_features, FeatureVector, Observation, SensorType, FEATURE_COUNT};
pub use metrics::{evaluate_predictions, Metrics};
pub use node::{ClassCounts, FeatureIndex, Node, NodeId};
pub use predict::{Class, PredictionResult, RiskLevel};
pub use tree::{Tree, MAX_TRAVERSAL_STEPS};
