/// The logistic function, mapping a log-odds score to a probability.
pub fn sigmoid(z: f64) -> f64 {
    1. / (1. + (-z).exp())
}
