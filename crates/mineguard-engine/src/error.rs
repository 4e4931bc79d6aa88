//! Error types for the risk-classification engine.
//!
//! Errors are scoped to the smallest unit that can fail: the whole model
//! (fatal at load), one observation, one tree, or one prediction. Nothing
//! in this crate retries; every operation is a deterministic pure function.

/// Errors from parsing and validating a model artifact.
///
/// These are fatal: a model that fails to load must not be used for any
/// prediction.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Returned when the artifact contains zero trees.
    #[error("model artifact contains no trees")]
    Empty,

    /// Returned when the artifact or one of its trees has the wrong shape.
    #[error("malformed model artifact: {reason}")]
    Malformed {
        /// Human-readable description of the shape violation.
        reason: String,
    },
}

/// Errors from feature construction for a single observation.
///
/// These skip one observation only; other observations are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// Returned when no type code is available for a sensor name.
    #[error("no type code available for sensor \"{sensor_type}\"")]
    UnknownSensor {
        /// The unrecognized sensor type name.
        sensor_type: String,
    },

    /// Returned when the raw sensor value is NaN or infinite.
    #[error("sensor value {value} is not finite")]
    InvalidValue {
        /// The rejected value.
        value: f64,
    },
}

/// Errors from traversing a single tree.
///
/// Contained per tree: a failing tree is omitted from the ensemble vote
/// and the prediction proceeds on the remaining trees.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    /// Returned when traversal exceeds the step ceiling without reaching a leaf.
    #[error("traversal exceeded {steps} steps without reaching a leaf")]
    Cycle {
        /// The step ceiling that was hit.
        steps: usize,
    },

    /// Returned when a node carries an unusable threshold, feature index,
    /// or child reference.
    #[error("malformed node at arena index {node_index}")]
    BadNode {
        /// Arena index of the offending node reference.
        node_index: usize,
    },
}

/// Errors from soft-voting aggregation for a single prediction.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// Returned when every tree failed traversal and no vote was cast.
    #[error("none of the {n_trees} trees produced a usable leaf")]
    NoUsableTrees {
        /// Total number of trees in the ensemble.
        n_trees: usize,
    },
}

/// Errors surfaced by the classification façade.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Feature construction rejected the observation.
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// Soft-voting aggregation failed.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
