use std::{
    error::Error,
    fmt::{self, Display},
    path::PathBuf,
};

use classifier::ClassifierErr;

use crate::Disease;

/// The result type used in the entire diagnosis module.
pub type Result<T> = std::result::Result<T, DiagnosisErr>;

/// Why a model could not be made available at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    /// The artifact does not exist.
    Missing,
    /// The artifact exists but could not be read or understood.
    Corrupt,
    /// The artifact loaded but was trained against a different field list.
    SchemaMismatch,
}

/// A model that failed to load. The process keeps running without it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub name: String,
    pub path: PathBuf,
    pub kind: LoadFailureKind,
    pub reason: String,
}

impl LoadFailure {
    pub(crate) fn from_classifier(name: &str, path: PathBuf, err: &ClassifierErr) -> Self {
        let kind = match err {
            ClassifierErr::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                LoadFailureKind::Missing
            }
            _ => LoadFailureKind::Corrupt,
        };

        Self {
            name: name.to_string(),
            path,
            kind,
            reason: err.to_string(),
        }
    }
}

impl Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            LoadFailureKind::Missing => "model file not found",
            LoadFailureKind::Corrupt => "model file unreadable",
            LoadFailureKind::SchemaMismatch => "model does not match the form",
        };

        write!(
            f,
            "{kind}: {} ({}): {}",
            self.path.display(),
            self.name,
            self.reason
        )
    }
}

impl Error for LoadFailure {}

/// The diagnosis module's error type.
#[derive(Debug)]
pub enum DiagnosisErr {
    ModelLoad(LoadFailure),
    /// Required fields were left empty, the model was not invoked.
    Validation {
        missing: Vec<&'static str>,
    },
    InvalidInput {
        field: String,
        reason: String,
    },
    UnknownField(String),
    /// The classifier for this disease failed to load at startup.
    PredictionUnavailable {
        disease: Disease,
    },
    FeatureMismatch {
        got: usize,
        expected: usize,
    },
    /// The classifier answered with a class that is neither 0 nor 1.
    UnexpectedLabel {
        label: i64,
    },
    Classifier(ClassifierErr),
    Config(String),
}

impl Display for DiagnosisErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosisErr::ModelLoad(failure) => write!(f, "{failure}"),
            DiagnosisErr::Validation { .. } => write!(f, "Please fill in all fields"),
            DiagnosisErr::InvalidInput { field, reason } => write!(f, "{field}: {reason}"),
            DiagnosisErr::UnknownField(key) => write!(f, "unknown field '{key}'"),
            DiagnosisErr::PredictionUnavailable { disease } => write!(
                f,
                "The {} model is unavailable, no prediction can be made",
                disease.condition()
            ),
            DiagnosisErr::FeatureMismatch { got, expected } => write!(
                f,
                "feature vector has {got} values, the model expects {expected}"
            ),
            DiagnosisErr::UnexpectedLabel { label } => {
                write!(f, "the model answered with unexpected class {label}")
            }
            DiagnosisErr::Classifier(e) => write!(f, "prediction failed: {e}"),
            DiagnosisErr::Config(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for DiagnosisErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DiagnosisErr::ModelLoad(failure) => Some(failure),
            DiagnosisErr::Classifier(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClassifierErr> for DiagnosisErr {
    fn from(value: ClassifierErr) -> Self {
        Self::Classifier(value)
    }
}

impl From<LoadFailure> for DiagnosisErr {
    fn from(value: LoadFailure) -> Self {
        Self::ModelLoad(value)
    }
}
