use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::{ClassifierErr, Result};

const LEAF: i64 = -1;

/// A fitted decision tree stored as parallel node arrays.
///
/// Node `i` is a leaf when `children_left[i] == -1`, otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left and the rest go right. `value[i]` holds the
/// per-class weight of the samples that reached node `i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

impl DecisionTree {
    /// Checks that the node arrays describe a finite tree over `n_features` inputs and
    /// `n_classes` outputs.
    ///
    /// Children are required to come after their parent, which rules out cycles and makes
    /// every walk terminate.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(ClassifierErr::Invalid("tree has no nodes".into()));
        }

        for (what, len) in [
            ("children_right", self.children_right.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
            ("value", self.value.len()),
        ] {
            if len != n {
                return Err(ClassifierErr::ShapeMismatch {
                    what,
                    got: len,
                    expected: n,
                });
            }
        }

        for i in 0..n {
            if self.value[i].len() != n_classes {
                return Err(ClassifierErr::ShapeMismatch {
                    what: "value",
                    got: self.value[i].len(),
                    expected: n_classes,
                });
            }

            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF {
                continue;
            }

            let child_ok = |c: i64| c > i as i64 && (c as usize) < n;
            if !child_ok(left) || !child_ok(right) {
                return Err(ClassifierErr::Invalid(format!(
                    "node {i} has out of order children ({left}, {right})"
                )));
            }

            let feature = self.feature[i];
            if feature < 0 || feature as usize >= n_features {
                return Err(ClassifierErr::Invalid(format!(
                    "node {i} splits on feature {feature}, the model has {n_features}"
                )));
            }
        }

        Ok(())
    }

    /// Walks the tree down to a leaf and returns its majority class index.
    pub fn class_index(&self, x: ArrayView1<f64>) -> usize {
        let mut node = 0;

        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if x[f] <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            } as usize;
        }

        argmax(&self.value[node])
    }
}

/// An ensemble of decision trees voting by majority.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Creates a new `RandomForest`.
    ///
    /// # Arguments
    /// * `trees` - The fitted trees.
    /// * `n_features` - The amount of inputs every tree is allowed to split on.
    /// * `n_classes` - The amount of classes every leaf votes over.
    ///
    /// # Returns
    /// A new `RandomForest` instance or an error if any tree is malformed.
    pub fn new(trees: Vec<DecisionTree>, n_features: usize, n_classes: usize) -> Result<Self> {
        if trees.is_empty() {
            return Err(ClassifierErr::Invalid("forest has no trees".into()));
        }

        for (i, tree) in trees.iter().enumerate() {
            tree.validate(n_features, n_classes).map_err(|e| match e {
                ClassifierErr::Invalid(msg) => ClassifierErr::Invalid(format!("tree {i}: {msg}")),
                other => other,
            })?;
        }

        Ok(Self { trees, n_classes })
    }

    /// Ties are resolved towards the lowest class index.
    pub fn class_index(&self, x: ArrayView1<f64>) -> usize {
        let mut votes = vec![0.; self.n_classes];
        for tree in &self.trees {
            votes[tree.class_index(x)] += 1.;
        }

        argmax(&votes)
    }
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &v)| {
            if v > max { (i, v) } else { (best, max) }
        })
        .0
}
