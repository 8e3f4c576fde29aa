use crossterm::event::KeyCode;
use diagnosis::PageRouter;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::Span,
    widgets::{Block, Paragraph},
};

use crate::ui::{
    layout::centered_rect,
    theme::Theme,
    widgets::{self, APP_TITLE},
};

use super::{Action, Screen, prediction::PredictionState};

pub fn handle_key(key: KeyCode, router: &mut PageRouter) -> Action {
    match key {
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Transition(Screen::Prediction(PredictionState::new(router))),
    }
}

pub fn draw(f: &mut Frame, router: &PageRouter) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(70, 60, area);
    let failures = router.registry().failures();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(failures.len() as u16 + 1),
            Constraint::Length(1),
        ])
        .split(outer);

    f.render_widget(Paragraph::new(Span::styled(APP_TITLE, Theme::title())), chunks[0]);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(
                "{} of {} models could not be loaded, their pages will not predict.",
                failures.len(),
                failures.len() + router.registry().len()
            ),
            Theme::warn(),
        )),
        chunks[1],
    );
    f.render_widget(widgets::load_warnings(failures), chunks[2]);
    widgets::hints(f, chunks[3], &[("any key", "continue"), ("q", "quit")]);
}
