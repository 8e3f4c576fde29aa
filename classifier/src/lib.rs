pub mod artifact;
mod classifier;
pub mod error;
pub mod models;

pub use artifact::{Artifact, Estimator, FORMAT_VERSION, ModelSpec, load};
pub use classifier::Classifier;
pub use error::{ClassifierErr, Result};
