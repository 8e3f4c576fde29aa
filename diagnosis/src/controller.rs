use std::fmt;

use classifier::{Classifier, ClassifierErr};
use log::{debug, info, warn};
use ndarray::{Array1, Axis};

use crate::{DiagnosisErr, Disease, FormState, Result, fields::FieldSpec};

/// The two outcomes a binary screening can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Maps a raw class label to an outcome, `None` for anything but 0 and 1.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Label::Positive),
            0 => Some(Label::Negative),
            _ => None,
        }
    }
}

/// The verdict of a single submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionResult {
    pub label: Label,
    pub disease: Disease,
}

impl PredictionResult {
    pub fn is_positive(&self) -> bool {
        self.label == Label::Positive
    }

    pub fn message(&self) -> String {
        let condition = self.disease.condition();
        match self.label {
            Label::Positive => format!("You have {condition}"),
            Label::Negative => format!("You don't have {condition}"),
        }
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Turns a filled form into a verdict for one disease.
#[derive(Debug, Clone, Copy)]
pub struct PredictionController {
    disease: Disease,
    fields: &'static [FieldSpec],
}

impl PredictionController {
    /// Creates a new `PredictionController` using the disease's own field list.
    pub fn new(disease: Disease) -> Self {
        Self::with_fields(disease, disease.fields())
    }

    /// Creates a new `PredictionController`.
    ///
    /// # Arguments
    /// * `disease` - The condition the verdict is about.
    /// * `fields` - The fields, in the exact order the classifier expects its features.
    ///
    /// # Returns
    /// A new `PredictionController` instance.
    pub fn with_fields(disease: Disease, fields: &'static [FieldSpec]) -> Self {
        Self { disease, fields }
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Validates `form`, runs `model` on it and maps the answer to a verdict.
    ///
    /// The model is never invoked when it is absent or when a required field is missing.
    ///
    /// # Errors
    /// * `PredictionUnavailable` - `model` failed to load at startup.
    /// * `Validation` - a required field was not provided.
    /// * `FeatureMismatch` - the model expects a different amount of features.
    /// * `UnexpectedLabel` - the model answered with neither 0 nor 1.
    pub fn submit(
        &self,
        form: &FormState,
        model: Option<&dyn Classifier>,
    ) -> Result<PredictionResult> {
        let Some(model) = model else {
            warn!("submit on {} without a loaded model", self.disease);
            return Err(DiagnosisErr::PredictionUnavailable {
                disease: self.disease,
            });
        };

        let missing = form.missing_required(self.fields);
        if !missing.is_empty() {
            warn!("submit on {} rejected, missing: {missing:?}", self.disease);
            return Err(DiagnosisErr::Validation { missing });
        }

        let vector = form.vector(self.fields);
        if vector.len() != model.n_features() {
            return Err(DiagnosisErr::FeatureMismatch {
                got: vector.len(),
                expected: model.n_features(),
            });
        }

        debug!("predicting {} on {vector:?}", self.disease);
        let x = Array1::from(vector).insert_axis(Axis(0));

        let class = model.predict(x.view())?.first().copied().ok_or(
            ClassifierErr::ShapeMismatch {
                what: "predictions",
                got: 0,
                expected: 1,
            },
        )?;

        let label =
            Label::from_class(class).ok_or(DiagnosisErr::UnexpectedLabel { label: class })?;
        let result = PredictionResult {
            label,
            disease: self.disease,
        };

        info!("{}: {result}", model.name());
        Ok(result)
    }
}
