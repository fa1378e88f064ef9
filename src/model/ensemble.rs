//! Gradient-boosted regression trees.
//!
//! The dump layout follows the XGBoost JSON model: every tree is a set of parallel arrays
//! indexed by node ID, with `-1` in `left_children` marking a leaf.

use serde::{Deserialize, Serialize};

use crate::model::error::{LoadError, ShapeMismatchError};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct EnsembleDump {
    #[serde(default)]
    pub base_score: f64,

    pub trees: Vec<TreeDump>,

    /// Learned importances, aligned with the bundle columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<Vec<f64>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TreeDump {
    pub left_children: Vec<i32>,
    pub right_children: Vec<i32>,
    pub split_indices: Vec<u32>,

    /// Split threshold for inner nodes, leaf value for leaves.
    pub split_conditions: Vec<f64>,

    /// Direction for a missing (NaN) feature, defaults to left.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_left: Vec<bool>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        default_left: bool,
    },
    Leaf(f64),
}

#[derive(Clone, Debug)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn from_dump(dump: TreeDump, n_features: usize) -> Result<Self, String> {
        let n_nodes = dump.left_children.len();
        if n_nodes == 0 {
            return Err("empty tree".to_string());
        }
        if dump.right_children.len() != n_nodes
            || dump.split_indices.len() != n_nodes
            || dump.split_conditions.len() != n_nodes
            || (!dump.default_left.is_empty() && dump.default_left.len() != n_nodes)
        {
            return Err(format!("tree arrays must all have {} entries", n_nodes));
        }

        let mut nodes = Vec::with_capacity(n_nodes);
        for id in 0..n_nodes {
            let left = dump.left_children[id];
            if left == -1 {
                nodes.push(Node::Leaf(dump.split_conditions[id]));
                continue;
            }
            let right = dump.right_children[id];
            // Children always follow their parent, which also rules out cycles.
            for child in [left, right] {
                if child <= id as i32 || child as usize >= n_nodes {
                    return Err(format!("node #{} has an invalid child #{}", id, child));
                }
            }
            let feature = dump.split_indices[id] as usize;
            if feature >= n_features {
                return Err(format!(
                    "node #{} splits on feature #{}, but there are only {} columns",
                    id, feature, n_features,
                ));
            }
            nodes.push(Node::Split {
                feature,
                threshold: dump.split_conditions[id],
                left: left as usize,
                right: right as usize,
                default_left: dump.default_left.get(id).copied().unwrap_or(true),
            });
        }
        Ok(Self { nodes })
    }

    /// Walks the tree from the root and returns the reached leaf value.
    #[must_use]
    pub fn leaf_value(&self, row: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = row[feature];
                    let goes_left = if value.is_nan() {
                        default_left
                    } else {
                        value < threshold
                    };
                    id = if goes_left { left } else { right };
                }
            }
        }
    }

    fn split_features(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Split { feature, .. } => Some(*feature),
            Node::Leaf(_) => None,
        })
    }
}

/// Immutable, validated tree ensemble.
#[derive(Clone, Debug)]
pub struct TreeEnsemble {
    base_score: f64,
    trees: Vec<RegressionTree>,
    feature_importances: Vec<f64>,
    n_features: usize,
}

impl TreeEnsemble {
    pub fn from_dump(dump: EnsembleDump, n_features: usize) -> Result<Self, LoadError> {
        if dump.trees.is_empty() {
            return Err(LoadError::Invalid("the ensemble has no trees".to_string()));
        }
        let trees = dump
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| {
                RegressionTree::from_dump(tree, n_features)
                    .map_err(|message| LoadError::Invalid(format!("tree #{}: {}", i, message)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let feature_importances = match dump.feature_importances {
            Some(importances) if importances.len() == n_features => importances,
            Some(importances) => {
                return Err(LoadError::Invalid(format!(
                    "{} feature importances for {} columns",
                    importances.len(),
                    n_features,
                )));
            }
            None => split_count_importances(&trees, n_features),
        };

        Ok(Self {
            base_score: dump.base_score,
            trees,
            feature_importances,
            n_features,
        })
    }

    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Raw model output for a single row: base score plus every tree's leaf.
    pub fn predict(&self, row: &[f64]) -> Result<f64, ShapeMismatchError> {
        if row.len() != self.n_features {
            return Err(ShapeMismatchError {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        Ok(self.base_score + self.trees.iter().map(|tree| tree.leaf_value(row)).sum::<f64>())
    }

    /// Importances aligned with the columns by position.
    #[must_use]
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

/// Number of splits per feature, normalized to sum up to one.
fn split_count_importances(trees: &[RegressionTree], n_features: usize) -> Vec<f64> {
    let mut counts = vec![0.0; n_features];
    for feature in trees.iter().flat_map(RegressionTree::split_features) {
        counts[feature] += 1.0;
    }
    let total: f64 = counts.iter().sum();
    if total != 0.0 {
        for count in &mut counts {
            *count /= total;
        }
    }
    counts
}
