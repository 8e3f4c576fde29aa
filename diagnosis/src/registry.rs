use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use classifier::Classifier;
use log::{info, warn};

use crate::{AppConfig, Disease, LoadFailure, LoadFailureKind, Result, fields::FieldSpec};

/// Holds every classifier that loaded successfully, and a record of the ones that didn't.
///
/// The registry is filled once at startup and read-only afterwards.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Box<dyn Classifier>>,
    failures: Vec<LoadFailure>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the artifact of every disease from the configured models directory.
    ///
    /// Failures are logged and recorded, the remaining models are still loaded.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut registry = Self::new();

        for disease in Disease::ALL {
            let path = config.artifact_path(disease);
            if let Err(e) = registry.load_for(disease, &path) {
                warn!("{e}");
            }
        }

        info!(
            "model registry ready: {} loaded, {} unavailable",
            registry.models.len(),
            registry.failures.len()
        );

        registry
    }

    /// Loads the classifier stored at `path` and registers it under `name`.
    ///
    /// # Errors
    /// Returns [`DiagnosisErr::ModelLoad`](crate::DiagnosisErr::ModelLoad) if the artifact
    /// is missing or corrupt. The failure is also kept in [`ModelRegistry::failures`].
    pub fn load<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<()> {
        let path = path.as_ref();
        let model = classifier::load(path)
            .map_err(|e| self.fail(LoadFailure::from_classifier(name, path.to_path_buf(), &e)))?;

        self.insert(name, Box::new(model));
        Ok(())
    }

    /// Like [`ModelRegistry::load`] but also checks that the classifier was trained against
    /// the disease's field list.
    pub fn load_for<P: AsRef<Path>>(&mut self, disease: Disease, path: P) -> Result<()> {
        let path = path.as_ref();
        let name = disease.model_name();

        let model = classifier::load(path)
            .map_err(|e| self.fail(LoadFailure::from_classifier(name, path.to_path_buf(), &e)))?;

        self.register_checked(disease, Box::new(model), path.to_path_buf())
    }

    /// Registers an already built classifier for `disease` after checking its schema.
    ///
    /// # Errors
    /// Returns a [`LoadFailureKind::SchemaMismatch`] failure if the feature count or names
    /// disagree with the disease's fields.
    pub fn register_for(&mut self, disease: Disease, model: Box<dyn Classifier>) -> Result<()> {
        self.register_checked(disease, model, PathBuf::new())
    }

    fn register_checked(
        &mut self,
        disease: Disease,
        model: Box<dyn Classifier>,
        path: PathBuf,
    ) -> Result<()> {
        let name = disease.model_name();

        if let Err(reason) = check_schema(model.as_ref(), disease.fields()) {
            return Err(self
                .fail(LoadFailure {
                    name: name.to_string(),
                    path,
                    kind: LoadFailureKind::SchemaMismatch,
                    reason,
                })
                .into());
        }

        self.insert(name, model);
        Ok(())
    }

    /// Registers `model` under `name` without any check, replacing a previous one.
    pub fn insert(&mut self, name: &str, model: Box<dyn Classifier>) {
        info!("registered model '{name}' ({} features)", model.n_features());
        self.models.insert(name.to_string(), model);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Classifier> {
        self.models.get(name).map(|m| m.as_ref())
    }

    pub fn get_for(&self, disease: Disease) -> Option<&dyn Classifier> {
        self.get(disease.model_name())
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    fn fail(&mut self, failure: LoadFailure) -> LoadFailure {
        self.failures.push(failure.clone());
        failure
    }
}

/// The feature vector is built from `fields` in order, so the model must agree on both the
/// count and, when it recorded them, the names.
fn check_schema(model: &dyn Classifier, fields: &[FieldSpec]) -> std::result::Result<(), String> {
    if model.n_features() != fields.len() {
        return Err(format!(
            "'{}' expects {} features, the form has {}",
            model.name(),
            model.n_features(),
            fields.len()
        ));
    }

    let names = model.feature_names();
    if names.is_empty() {
        return Ok(());
    }

    match names.iter().zip(fields).position(|(n, f)| n != f.key) {
        Some(i) => Err(format!(
            "feature {i} of '{}' is '{}', the form has '{}'",
            model.name(),
            names[i],
            fields[i].key
        )),
        None => Ok(()),
    }
}
