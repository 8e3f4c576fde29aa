use ndarray::ArrayView2;

use crate::Result;

/// A pre-trained, immutable binary decision function.
///
/// Implementors never mutate themselves on inference, so a single instance can be shared
/// read-only between any number of callers.
pub trait Classifier: Send + Sync {
    /// Returns the identifier of this classifier.
    fn name(&self) -> &str;

    /// Returns the ordered feature names the classifier was trained against, empty when the
    /// artifact did not record them.
    fn feature_names(&self) -> &[String];

    /// Returns the amount of features every input row must have.
    fn n_features(&self) -> usize;

    /// Classifies every row of `x`.
    ///
    /// # Arguments
    /// * `x` - The samples, one per row, with exactly `n_features` columns.
    ///
    /// # Returns
    /// One class label per row or an error if the input has the wrong shape.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<i64>>;
}
