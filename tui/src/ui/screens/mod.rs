pub mod prediction;
pub mod warnings;

use crossterm::event::KeyCode;
use diagnosis::PageRouter;
use ratatui::Frame;

pub enum Action {
    None,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Warnings,
    Prediction(prediction::PredictionState),
}

impl Screen {
    /// Starts on the load warnings when a model is missing, on the first page otherwise.
    pub fn initial(router: &PageRouter) -> Self {
        if router.registry().failures().is_empty() {
            Screen::Prediction(prediction::PredictionState::new(router))
        } else {
            Screen::Warnings
        }
    }

    pub fn draw(&self, f: &mut Frame, router: &PageRouter) {
        match self {
            Screen::Warnings => warnings::draw(f, router),
            Screen::Prediction(s) => prediction::draw(f, s, router),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, router: &mut PageRouter) -> Action {
        match self {
            Screen::Warnings => warnings::handle_key(key, router),
            Screen::Prediction(s) => prediction::handle_key(s, key, router),
        }
    }
}
