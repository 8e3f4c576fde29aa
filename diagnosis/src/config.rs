use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{DiagnosisErr, Disease, Result};

const DEFAULT_MODELS_DIR: &str = "models";
const DEFAULT_LOG_FILE: &str = "disease-prediction.log";

/// Environment variable pointing at a JSON config file.
pub const CONFIG_VAR: &str = "PREDICTION_CONFIG";
pub const MODELS_DIR_VAR: &str = "MODELS_DIR";
pub const LOG_FILE_VAR: &str = "LOG_FILE";

/// Where the app finds its models and writes its logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub models_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Loads an [`AppConfig`] from a JSON file. Missing keys take their default value.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| DiagnosisErr::Config(format!("cannot read '{}': {e}", path.display())))?;

        serde_json::from_str(&content)
            .map_err(|e| DiagnosisErr::Config(format!("'{}': {e}", path.display())))
    }

    /// Builds the config from the process environment.
    ///
    /// `PREDICTION_CONFIG` names an optional JSON file, `MODELS_DIR` and `LOG_FILE` override
    /// single values on top of it.
    ///
    /// # Errors
    /// Returns an error if `PREDICTION_CONFIG` is set but the file is unusable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_VAR) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(dir) = lookup(MODELS_DIR_VAR) {
            config.models_dir = PathBuf::from(dir);
        }

        if let Some(file) = lookup(LOG_FILE_VAR) {
            config.log_file = PathBuf::from(file);
        }

        Ok(config)
    }

    /// Returns where the artifact of `disease` is expected.
    pub fn artifact_path(&self, disease: Disease) -> PathBuf {
        self.models_dir.join(disease.artifact_file())
    }
}
