//! Support vector machine inference.
//!
//! Only the decision function is evaluated, the sign of it picks the class:
//!
//! - Linear kernel: f(x) = w·x + b
//! - RBF kernel: f(x) = Σ(αᵢ·exp(-γ||x-xᵢ||²)) + b

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{ClassifierErr, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf,
}

#[derive(Debug, Clone)]
enum Params {
    Linear {
        weights: Array1<f64>,
    },
    Rbf {
        gamma: f64,
        dual_coef: Array1<f64>,
        support_vectors: Array2<f64>,
    },
}

/// A binary SVM classifier.
#[derive(Debug, Clone)]
pub struct Svm {
    params: Params,
    intercept: f64,
}

impl Svm {
    /// Creates a linear `Svm` from its primal weights.
    pub fn linear(weights: Vec<f64>, intercept: f64) -> Result<Self> {
        if weights.is_empty() {
            return Err(ClassifierErr::Invalid(
                "linear svm needs at least one weight".into(),
            ));
        }

        Ok(Self {
            params: Params::Linear {
                weights: Array1::from(weights),
            },
            intercept,
        })
    }

    /// Creates an RBF `Svm` from its dual representation.
    ///
    /// # Arguments
    /// * `gamma` - The kernel coefficient, must be positive.
    /// * `dual_coef` - One signed coefficient (αᵢ·yᵢ) per support vector.
    /// * `support_vectors` - The support vectors, all of the same length.
    /// * `intercept` - The bias term.
    ///
    /// # Returns
    /// A new `Svm` instance or an error if the shapes don't agree.
    pub fn rbf(
        gamma: f64,
        dual_coef: Vec<f64>,
        support_vectors: Vec<Vec<f64>>,
        intercept: f64,
    ) -> Result<Self> {
        if !(gamma > 0.) {
            return Err(ClassifierErr::Invalid(format!(
                "rbf gamma must be positive, got {gamma}"
            )));
        }

        if support_vectors.is_empty() {
            return Err(ClassifierErr::Invalid(
                "rbf svm needs at least one support vector".into(),
            ));
        }

        if dual_coef.len() != support_vectors.len() {
            return Err(ClassifierErr::ShapeMismatch {
                what: "dual_coef",
                got: dual_coef.len(),
                expected: support_vectors.len(),
            });
        }

        let dim = support_vectors[0].len();
        if let Some(bad) = support_vectors.iter().find(|sv| sv.len() != dim) {
            return Err(ClassifierErr::ShapeMismatch {
                what: "support_vectors",
                got: bad.len(),
                expected: dim,
            });
        }

        let rows = support_vectors.len();
        let flat = support_vectors.into_iter().flatten().collect();
        let support_vectors = Array2::from_shape_vec((rows, dim), flat)
            .map_err(|e| ClassifierErr::Invalid(e.to_string()))?;

        Ok(Self {
            params: Params::Rbf {
                gamma,
                dual_coef: Array1::from(dual_coef),
                support_vectors,
            },
            intercept,
        })
    }

    pub fn kernel(&self) -> Kernel {
        match self.params {
            Params::Linear { .. } => Kernel::Linear,
            Params::Rbf { .. } => Kernel::Rbf,
        }
    }

    pub fn n_features(&self) -> usize {
        match &self.params {
            Params::Linear { weights } => weights.len(),
            Params::Rbf {
                support_vectors, ..
            } => support_vectors.ncols(),
        }
    }

    pub fn decision_function(&self, x: ArrayView1<f64>) -> f64 {
        let score: f64 = match &self.params {
            Params::Linear { weights } => weights.iter().zip(x.iter()).map(|(w, v)| w * v).sum(),
            Params::Rbf {
                gamma,
                dual_coef,
                support_vectors,
            } => support_vectors
                .rows()
                .into_iter()
                .zip(dual_coef.iter())
                .map(|(sv, alpha)| {
                    let sq_dist: f64 = sv.iter().zip(x.iter()).map(|(a, b)| (a - b).powi(2)).sum();
                    alpha * (-gamma * sq_dist).exp()
                })
                .sum(),
        };

        score + self.intercept
    }

    pub fn class_index(&self, x: ArrayView1<f64>) -> usize {
        usize::from(self.decision_function(x) > 0.)
    }
}
