use ndarray::{Array1, ArrayView1};

use super::sigmoid;
use crate::{ClassifierErr, Result};

/// Binary logistic regression: `p = sigmoid(w·x + b)`, positive class when `p >= threshold`.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Array1<f64>,
    intercept: f64,
    threshold: f64,
}

impl LogisticRegression {
    /// Creates a new `LogisticRegression`.
    ///
    /// # Arguments
    /// * `coefficients` - One weight per feature.
    /// * `intercept` - The bias term.
    /// * `threshold` - Probability at or above which the sample is assigned class index 1.
    ///
    /// # Returns
    /// A new `LogisticRegression` instance or an error if the parameters are not usable.
    pub fn new(coefficients: Vec<f64>, intercept: f64, threshold: f64) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(ClassifierErr::Invalid(
                "logistic regression needs at least one coefficient".into(),
            ));
        }

        if !(threshold > 0. && threshold < 1.) {
            return Err(ClassifierErr::Invalid(format!(
                "threshold must lie in (0, 1), got {threshold}"
            )));
        }

        if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierErr::Invalid(
                "logistic regression parameters must be finite".into(),
            ));
        }

        Ok(Self {
            coefficients: Array1::from(coefficients),
            intercept,
            threshold,
        })
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the probability of the positive class for `x`.
    pub fn probability(&self, x: ArrayView1<f64>) -> f64 {
        let z: f64 = self
            .coefficients
            .iter()
            .zip(x.iter())
            .map(|(w, v)| w * v)
            .sum();

        sigmoid(z + self.intercept)
    }

    pub fn class_index(&self, x: ArrayView1<f64>) -> usize {
        usize::from(self.probability(x) >= self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn splits_on_the_decision_boundary() {
        let model = LogisticRegression::new(vec![1., -1.], 0., 0.5).unwrap();

        assert_eq!(model.class_index(array![2., 1.].view()), 1);
        assert_eq!(model.class_index(array![1., 2.].view()), 0);
        // p == threshold goes to the positive class
        assert_eq!(model.class_index(array![1., 1.].view()), 1);
    }

    #[test]
    fn intercept_shifts_the_boundary() {
        let model = LogisticRegression::new(vec![1.], -5., 0.5).unwrap();

        assert_eq!(model.class_index(array![4.].view()), 0);
        assert_eq!(model.class_index(array![6.].view()), 1);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(LogisticRegression::new(vec![], 0., 0.5).is_err());
        assert!(LogisticRegression::new(vec![1.], 0., 1.).is_err());
        assert!(LogisticRegression::new(vec![f64::NAN], 0., 0.5).is_err());
    }
}
