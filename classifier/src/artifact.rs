//! On-disk representation of a fitted classifier.
//!
//! An artifact is a JSON document exported from the estimator that was trained offline:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "diabetes",
//!   "features": ["Pregnancies", "Glucose"],
//!   "n_features": 2,
//!   "classes": [0, 1],
//!   "model": { "kind": "logistic_regression", "coefficients": [0.1, 0.03], "intercept": -5.0 }
//! }
//! ```
//!
//! `features` is optional, `classes` defaults to `[0, 1]`.

use std::{fs, path::Path};

use log::info;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::{
    Classifier, ClassifierErr, Result,
    models::{DecisionTree, Kernel, LogisticRegression, Model, RandomForest, Svm},
};

/// The artifact format version this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub format_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    pub n_features: usize,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    pub model: ModelSpec,
}

/// The fitted parameters, tagged by model family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    Svm {
        kernel: Kernel,
        #[serde(default)]
        weights: Vec<f64>,
        #[serde(default)]
        gamma: f64,
        #[serde(default)]
        dual_coef: Vec<f64>,
        #[serde(default)]
        support_vectors: Vec<Vec<f64>>,
        intercept: f64,
    },
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

fn default_threshold() -> f64 {
    0.5
}

/// A classifier built from a validated [`Artifact`].
#[derive(Debug, Clone)]
pub struct Estimator {
    name: String,
    features: Vec<String>,
    n_features: usize,
    classes: Vec<i64>,
    model: Model,
}

impl Estimator {
    /// Validates an [`Artifact`] and builds the estimator it describes.
    ///
    /// # Errors
    /// Returns an error if the version is unsupported or any dimension disagrees with
    /// `n_features` or `classes`.
    pub fn from_artifact(artifact: Artifact) -> Result<Self> {
        let Artifact {
            format_version,
            name,
            features,
            n_features,
            classes,
            model,
        } = artifact;

        if format_version != FORMAT_VERSION {
            return Err(ClassifierErr::UnsupportedVersion {
                got: format_version,
                supported: FORMAT_VERSION,
            });
        }

        if n_features == 0 {
            return Err(ClassifierErr::Invalid("n_features must be greater than zero".into()));
        }

        if !features.is_empty() && features.len() != n_features {
            return Err(ClassifierErr::ShapeMismatch {
                what: "features",
                got: features.len(),
                expected: n_features,
            });
        }

        let model = build_model(model, n_features, classes.len())?;

        Ok(Self {
            name,
            features,
            n_features,
            classes,
            model,
        })
    }

    /// Returns the model family backing this estimator.
    pub fn kind(&self) -> &'static str {
        self.model.kind()
    }
}

fn build_model(spec: ModelSpec, n_features: usize, n_classes: usize) -> Result<Model> {
    let binary = |family: &str| {
        if n_classes == 2 {
            Ok(())
        } else {
            Err(ClassifierErr::Invalid(format!(
                "{family} is binary, the artifact declares {n_classes} classes"
            )))
        }
    };

    let check_dim = |what: &'static str, got: usize| {
        if got == n_features {
            Ok(())
        } else {
            Err(ClassifierErr::ShapeMismatch {
                what,
                got,
                expected: n_features,
            })
        }
    };

    let model = match spec {
        ModelSpec::LogisticRegression {
            coefficients,
            intercept,
            threshold,
        } => {
            binary("logistic regression")?;
            check_dim("coefficients", coefficients.len())?;
            Model::LogisticRegression(LogisticRegression::new(coefficients, intercept, threshold)?)
        }
        ModelSpec::Svm {
            kernel,
            weights,
            gamma,
            dual_coef,
            support_vectors,
            intercept,
        } => {
            binary("svm")?;
            let svm = match kernel {
                Kernel::Linear => Svm::linear(weights, intercept)?,
                Kernel::Rbf => Svm::rbf(gamma, dual_coef, support_vectors, intercept)?,
            };
            check_dim("svm input", svm.n_features())?;
            Model::Svm(svm)
        }
        ModelSpec::RandomForest { trees } => {
            if n_classes < 2 {
                return Err(ClassifierErr::Invalid(format!(
                    "random forest needs at least two classes, got {n_classes}"
                )));
            }
            Model::RandomForest(RandomForest::new(trees, n_features, n_classes)?)
        }
    };

    Ok(model)
}

/// Reads an [`Artifact`] from `path` and builds its [`Estimator`].
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or describes an invalid
/// model.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Estimator> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let artifact: Artifact = serde_json::from_str(&content)?;
    let estimator = Estimator::from_artifact(artifact)?;

    info!(
        "loaded {} '{}' from {}: n_features={}",
        estimator.kind(),
        estimator.name,
        path.display(),
        estimator.n_features
    );

    Ok(estimator)
}

impl Classifier for Estimator {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<i64>> {
        if x.ncols() != self.n_features {
            return Err(ClassifierErr::ShapeMismatch {
                what: "input columns",
                got: x.ncols(),
                expected: self.n_features,
            });
        }

        let labels = x
            .rows()
            .into_iter()
            .map(|row| self.classes[self.model.class_index(row)])
            .collect();

        Ok(labels)
    }
}
