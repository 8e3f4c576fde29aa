use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire classifier module.
pub type Result<T> = std::result::Result<T, ClassifierErr>;

/// The classifier module's error type.
#[derive(Debug)]
pub enum ClassifierErr {
    /// The artifact could not be read from storage.
    Io(io::Error),
    /// The artifact is not a valid JSON document for the expected schema.
    Parse(serde_json::Error),
    UnsupportedVersion {
        got: u32,
        supported: u32,
    },
    /// The artifact parsed but describes an impossible model.
    Invalid(String),
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
}

impl Display for ClassifierErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierErr::Io(e) => write!(f, "io error: {e}"),
            ClassifierErr::Parse(e) => write!(f, "invalid artifact: {e}"),
            ClassifierErr::UnsupportedVersion { got, supported } => write!(
                f,
                "unsupported artifact format version {got}, this build reads version {supported}"
            ),
            ClassifierErr::Invalid(msg) => write!(f, "invalid model: {msg}"),
            ClassifierErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "shape mismatch in {what}: got {got}, expected {expected}"
            ),
        }
    }
}

impl Error for ClassifierErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClassifierErr::Io(e) => Some(e),
            ClassifierErr::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ClassifierErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ClassifierErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
