use log::info;

use crate::{
    DiagnosisErr, Disease, FormState, ModelRegistry, PredictionController, PredictionResult,
    form,
};

/// What the last submit on a page produced, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Verdict(PredictionResult),
    /// The input was rejected before reaching the model.
    Warning(String),
    Error(String),
}

impl From<Result<PredictionResult, DiagnosisErr>> for Outcome {
    fn from(value: Result<PredictionResult, DiagnosisErr>) -> Self {
        match value {
            Ok(result) => Outcome::Verdict(result),
            Err(e @ (DiagnosisErr::Validation { .. } | DiagnosisErr::InvalidInput { .. })) => {
                Outcome::Warning(e.to_string())
            }
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

/// The single active prediction page.
#[derive(Debug, Clone)]
pub struct Page {
    controller: PredictionController,
    pub form: FormState,
    outcome: Option<Outcome>,
}

impl Page {
    fn new(disease: Disease) -> Self {
        let controller = PredictionController::new(disease);
        Self {
            form: form::render(controller.fields()),
            controller,
            outcome: None,
        }
    }

    pub fn disease(&self) -> Disease {
        self.controller.disease()
    }

    pub fn title(&self) -> &'static str {
        self.disease().title()
    }

    pub fn button_label(&self) -> &'static str {
        self.disease().button_label()
    }

    pub fn fields(&self) -> &'static [crate::FieldSpec] {
        self.controller.fields()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Drops the rendered outcome, done whenever the form is edited.
    pub fn clear_outcome(&mut self) {
        self.outcome = None;
    }
}

/// Maps the sidebar selection to the one page being shown.
pub struct PageRouter {
    registry: ModelRegistry,
    page: Page,
}

impl PageRouter {
    /// Creates a new `PageRouter` showing the first page of the sidebar.
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry,
            page: Page::new(Disease::default()),
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Makes `choice` the active page, with a fresh form.
    pub fn select(&mut self, choice: Disease) -> &Page {
        info!("selected page: {}", choice.title());
        self.page = Page::new(choice);
        &self.page
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Whether the active page has a classifier to submit to.
    pub fn is_available(&self) -> bool {
        self.registry.get_for(self.page.disease()).is_some()
    }

    /// Submits the active page's form to its classifier and keeps the outcome on the page.
    pub fn submit(&mut self) -> &Outcome {
        let model = self.registry.get_for(self.page.disease());
        let result = self.page.controller.submit(&self.page.form, model);
        self.page.outcome.insert(Outcome::from(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_diabetes() {
        let router = PageRouter::new(ModelRegistry::new());

        assert_eq!(router.page().disease(), Disease::Diabetes);
        assert_eq!(router.page().title(), "Diabetes Prediction");
        assert!(router.page().outcome().is_none());
    }

    #[test]
    fn selecting_replaces_the_page_and_its_form() {
        let mut router = PageRouter::new(ModelRegistry::new());
        router.page_mut().form.set("Glucose", 120.).unwrap();

        let page = router.select(Disease::Parkinsons);
        assert_eq!(page.disease(), Disease::Parkinsons);
        assert_eq!(page.fields().len(), 22);
        assert_eq!(page.form.get("Glucose"), 0.);

        router.select(Disease::Diabetes);
        assert!(!router.page().form.is_provided("Glucose"));
    }

    #[test]
    fn submit_without_model_is_an_error_outcome() {
        let mut router = PageRouter::new(ModelRegistry::new());
        router.select(Disease::HeartDisease);

        assert!(!router.is_available());
        let outcome = router.submit().clone();
        assert_eq!(
            outcome,
            Outcome::Error(
                "The Heart Disease model is unavailable, no prediction can be made".into()
            )
        );
        assert_eq!(router.page().outcome(), Some(&outcome));

        router.page_mut().clear_outcome();
        assert!(router.page().outcome().is_none());
    }
}
