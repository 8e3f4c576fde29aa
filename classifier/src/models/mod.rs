mod forest;
mod logistic;
mod sigmoid;
mod svm;

use ndarray::ArrayView1;

pub use forest::{DecisionTree, RandomForest};
pub use logistic::LogisticRegression;
pub use sigmoid::sigmoid;
pub use svm::{Kernel, Svm};

/// The supported model families.
#[derive(Debug, Clone)]
pub enum Model {
    LogisticRegression(LogisticRegression),
    Svm(Svm),
    RandomForest(RandomForest),
}

impl Model {
    /// Returns the class index chosen for a single sample.
    pub fn class_index(&self, x: ArrayView1<f64>) -> usize {
        match self {
            Model::LogisticRegression(m) => m.class_index(x),
            Model::Svm(m) => m.class_index(x),
            Model::RandomForest(m) => m.class_index(x),
        }
    }

    /// Returns a short name for the model family, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Model::LogisticRegression(_) => "logistic_regression",
            Model::Svm(m) => match m.kernel() {
                Kernel::Linear => "svm_linear",
                Kernel::Rbf => "svm_rbf",
            },
            Model::RandomForest(_) => "random_forest",
        }
    }
}
