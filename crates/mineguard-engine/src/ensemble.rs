//! The immutable decision-tree ensemble.

use crate::tree::Tree;

/// A pre-trained ensemble of decision trees.
///
/// Constructed once via [`Ensemble::from_json`](crate::Ensemble::from_json)
/// and never mutated afterwards; it may be shared read-only across threads
/// without synchronization.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Ensemble {
    pub(crate) trees: Vec<Tree>,
}

impl Ensemble {
    /// Create an ensemble from converted trees.
    pub(crate) fn new(trees: Vec<Tree>) -> Self {
        Self { trees }
    }

    /// Return the number of trees in the ensemble.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Return the trees in artifact order.
    #[must_use]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }
}
