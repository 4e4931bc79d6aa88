//! Model artifact parsing and shallow validation.
//!
//! The artifact is the JSON export produced by the offline training
//! pipeline: a top-level object with a `trees` array, each tree an array
//! of node objects carrying `feature`, `threshold`, `left_child`,
//! `right_child`, and (for leaves) a length-2 `value`.

use serde_json::Value;
use tracing::{debug, info};

use crate::ensemble::Ensemble;
use crate::error::ModelError;
use crate::node::{ClassCounts, FeatureIndex, Node, NodeId};
use crate::tree::Tree;

/// Top-level artifact shape. The metadata fields are logged when present
/// and otherwise ignored; only `trees` is required.
#[derive(Debug, serde::Deserialize)]
struct RawModel {
    #[serde(default)]
    model_type: Option<String>,
    #[serde(default)]
    n_estimators: Option<usize>,
    #[serde(default)]
    n_classes: Option<usize>,
    #[serde(default)]
    n_features: Option<usize>,
    trees: Vec<Value>,
}

/// One node object as the exporter writes it.
///
/// `-1` and `null` are both in use as absent-child sentinels; a node is a
/// leaf iff both sides are absent.
#[derive(Debug, serde::Deserialize)]
struct RawNode {
    #[serde(default)]
    feature: Option<i64>,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    left_child: Option<i64>,
    #[serde(default)]
    right_child: Option<i64>,
    #[serde(default)]
    value: Option<Value>,
}

impl Ensemble {
    /// Parse and validate a JSON model artifact.
    ///
    /// Validation is shallow: the artifact must hold at least one tree and
    /// every tree must be a non-empty array. Structural defects inside a
    /// tree (cycles, dangling children, unusable thresholds) are caught at
    /// traversal time instead, where they disable only the affected tree.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ModelError::Empty`] | the artifact holds zero trees |
    /// | [`ModelError::Malformed`] | the top level is not an object with a `trees` array, or a tree is not a non-empty array |
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let raw: RawModel =
            serde_json::from_slice(bytes).map_err(|e| ModelError::Malformed {
                reason: format!("artifact is not a valid model object: {e}"),
            })?;

        if raw.trees.is_empty() {
            return Err(ModelError::Empty);
        }

        let mut trees = Vec::with_capacity(raw.trees.len());
        for (tree_index, raw_tree) in raw.trees.iter().enumerate() {
            let nodes_json = raw_tree.as_array().ok_or_else(|| ModelError::Malformed {
                reason: format!("tree {tree_index} is not an array of nodes"),
            })?;
            if nodes_json.is_empty() {
                return Err(ModelError::Malformed {
                    reason: format!("tree {tree_index} is empty"),
                });
            }
            let nodes: Vec<Node> = nodes_json.iter().map(convert_node).collect();
            trees.push(Tree::new(nodes));
        }

        if raw.n_estimators.is_some_and(|n| n != trees.len()) {
            debug!(
                declared = raw.n_estimators,
                actual = trees.len(),
                "n_estimators metadata disagrees with tree count"
            );
        }

        info!(
            n_trees = trees.len(),
            model_type = raw.model_type.as_deref().unwrap_or("unknown"),
            n_features = raw.n_features,
            n_classes = raw.n_classes,
            "model artifact loaded"
        );

        Ok(Ensemble::new(trees))
    }
}

/// Convert one raw node into an arena [`Node`].
///
/// A node is a leaf iff both child references are absent. An object that
/// does not deserialize at all becomes a poison split, so traversal of its
/// tree fails with `BadNode` instead of the load failing.
fn convert_node(json: &Value) -> Node {
    let raw: RawNode = match serde_json::from_value(json.clone()) {
        Ok(raw) => raw,
        Err(_) => return poison_node(),
    };

    let left = child_id(raw.left_child);
    let right = child_id(raw.right_child);

    if left.is_none() && right.is_none() {
        return Node::Leaf {
            counts: leaf_counts(raw.value.as_ref()),
        };
    }

    Node::Split {
        feature: feature_index(raw.feature),
        threshold: raw.threshold.unwrap_or(f64::NAN),
        left: left.unwrap_or(NodeId::DANGLING),
        right: right.unwrap_or(NodeId::DANGLING),
    }
}

/// A split no traversal can cross; stands in for an unparsable node.
fn poison_node() -> Node {
    Node::Split {
        feature: FeatureIndex::OUT_OF_RANGE,
        threshold: f64::NAN,
        left: NodeId::DANGLING,
        right: NodeId::DANGLING,
    }
}

fn child_id(raw: Option<i64>) -> Option<NodeId> {
    match raw {
        Some(id) if id >= 0 => Some(NodeId::new(id as usize)),
        _ => None,
    }
}

fn feature_index(raw: Option<i64>) -> FeatureIndex {
    match raw {
        Some(f) if f >= 0 => FeatureIndex::new(f as usize),
        _ => FeatureIndex::OUT_OF_RANGE,
    }
}

/// Extract leaf class weights from the exporter's `value` field: either
/// `[normal, risk]` or the nested `[[normal, risk]]` shape. Anything else
/// yields zero counts, which [`ClassCounts::distribution`] maps to the
/// neutral pair.
fn leaf_counts(value: Option<&Value>) -> ClassCounts {
    let arr = match value.and_then(Value::as_array) {
        Some(arr) => arr,
        None => return ClassCounts::new(0.0, 0.0),
    };
    let arr = match arr.first() {
        Some(Value::Array(inner)) => inner,
        _ => arr,
    };
    if arr.len() != 2 {
        return ClassCounts::new(0.0, 0.0);
    }
    match (arr[0].as_f64(), arr[1].as_f64()) {
        (Some(normal), Some(risk)) => ClassCounts::new(normal, risk),
        _ => ClassCounts::new(0.0, 0.0),
    }
}
