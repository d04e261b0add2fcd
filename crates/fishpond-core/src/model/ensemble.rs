//! Tree-ensemble classifier loaded from a JSON artifact
//!
//! The artifact mirrors scikit-learn's fitted tree arrays, one set per
//! estimator:
//!
//! ```json
//! {
//!   "n_features": 4,
//!   "classes": [0, 1, 2],
//!   "estimators": [
//!     {
//!       "children_left":  [1, -1, -1],
//!       "children_right": [2, -1, -1],
//!       "feature":        [2, -2, -2],
//!       "threshold":      [3.0, -2.0, -2.0],
//!       "value":          [[10, 10, 10], [1, 5, 20], [30, 2, 1]]
//!     }
//!   ]
//! }
//! ```
//!
//! A node is a leaf when both children are `-1`. Split nodes send a sample
//! left when `x[feature] <= threshold`. Each leaf's `value` row is normalized
//! to class probabilities; the ensemble averages them over all estimators and
//! returns the class with the highest mean.

use std::path::Path;

use serde::Deserialize;

use super::{Classifier, ModelError};
use crate::reading::{FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};

/// Marker scikit-learn uses for "no child"
const TREE_LEAF: i64 = -1;

#[derive(Debug, Deserialize)]
struct RawEnsemble {
    n_features: usize,
    classes: Vec<i64>,
    estimators: Vec<RawTree>,
}

#[derive(Debug, Deserialize)]
struct RawTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        probabilities: Vec<f64>,
    },
}

/// A single validated decision tree
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_raw(raw: RawTree, n_classes: usize) -> Result<Self, String> {
        let n_nodes = raw.children_left.len();
        if n_nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if raw.children_right.len() != n_nodes
            || raw.feature.len() != n_nodes
            || raw.threshold.len() != n_nodes
            || raw.value.len() != n_nodes
        {
            return Err(format!(
                "node arrays disagree in length (children_left has {})",
                n_nodes
            ));
        }

        let mut nodes = Vec::with_capacity(n_nodes);
        for i in 0..n_nodes {
            let (left, right) = (raw.children_left[i], raw.children_right[i]);
            let row = &raw.value[i];
            if row.len() != n_classes {
                return Err(format!(
                    "node {} has {} class values, expected {}",
                    i,
                    row.len(),
                    n_classes
                ));
            }
            if row.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(format!("node {} has a negative or non-finite value", i));
            }

            if left == TREE_LEAF && right == TREE_LEAF {
                let total: f64 = row.iter().sum();
                if total <= 0.0 {
                    return Err(format!("leaf {} has no class weight", i));
                }
                nodes.push(Node::Leaf {
                    probabilities: row.iter().map(|v| v / total).collect(),
                });
                continue;
            }

            let left = child_index(i, left, n_nodes)?;
            let right = child_index(i, right, n_nodes)?;
            let feature = usize::try_from(raw.feature[i])
                .ok()
                .filter(|f| *f < FEATURE_COUNT)
                .ok_or_else(|| format!("node {} splits on unknown feature {}", i, raw.feature[i]))?;
            let threshold = raw.threshold[i];
            if !threshold.is_finite() {
                return Err(format!("node {} has a non-finite threshold", i));
            }

            nodes.push(Node::Split {
                feature,
                threshold,
                left,
                right,
            });
        }

        Ok(Self { nodes })
    }

    /// Class probabilities at the leaf this row lands in
    pub(crate) fn leaf_probabilities(&self, features: &FeatureVector) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { probabilities } => return probabilities,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Children always come after their parent, which keeps traversal acyclic.
fn child_index(parent: usize, child: i64, n_nodes: usize) -> Result<usize, String> {
    usize::try_from(child)
        .ok()
        .filter(|c| *c > parent && *c < n_nodes)
        .ok_or_else(|| format!("node {} has invalid child {}", parent, child))
}

/// Averaged-probability ensemble of decision trees
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    /// Read and validate an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let ensemble = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded {} tree(s) over {} classes from {:?}",
            ensemble.trees.len(),
            ensemble.classes.len(),
            path
        );
        Ok(ensemble)
    }

    /// Parse and validate an artifact from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let raw: RawEnsemble =
            serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;

        if raw.n_features != FEATURE_COUNT {
            return Err(ModelError::Invalid(format!(
                "model expects {} features, readings have {}",
                raw.n_features, FEATURE_COUNT
            )));
        }
        if raw.classes.is_empty() {
            return Err(ModelError::Invalid("no classes".to_string()));
        }
        if raw.estimators.is_empty() {
            return Err(ModelError::Invalid("no estimators".to_string()));
        }

        let n_classes = raw.classes.len();
        let trees = raw
            .estimators
            .into_iter()
            .enumerate()
            .map(|(i, tree)| {
                DecisionTree::from_raw(tree, n_classes)
                    .map_err(|e| ModelError::Invalid(format!("estimator {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            classes: raw.classes,
            trees,
        })
    }

    /// Mean class probabilities over all trees, ordered like [`Self::classes`]
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        if let Some(i) = features.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::Inference(format!(
                "{} is not a finite number",
                FEATURE_COLUMNS[i]
            )));
        }

        let mut mean = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in mean.iter_mut().zip(tree.leaf_probabilities(features)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        mean.iter_mut().for_each(|p| *p /= n_trees);
        Ok(mean)
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError> {
        let proba = self.predict_proba(features)?;

        // First index wins ties
        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}
