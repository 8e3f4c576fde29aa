pub mod config;
pub mod controller;
pub mod disease;
pub mod error;
pub mod fields;
pub mod form;
pub mod registry;
pub mod router;

pub use config::AppConfig;
pub use controller::{Label, PredictionController, PredictionResult};
pub use disease::Disease;
pub use error::{DiagnosisErr, LoadFailure, LoadFailureKind, Result};
pub use fields::{ChoiceOption, FieldKind, FieldSpec};
pub use form::FormState;
pub use registry::ModelRegistry;
pub use router::{Outcome, Page, PageRouter};
