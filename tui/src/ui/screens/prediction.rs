use crossterm::event::KeyCode;
use diagnosis::{DiagnosisErr, Disease, FieldKind, Outcome, PageRouter, fields};
use log::debug;
use ratatui::{
    Frame,
    layout::Rect,
    text::Span,
    widgets::{Block, Paragraph},
};

use crate::ui::{
    layout,
    theme::Theme,
    widgets::{self, FieldText},
};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Form,
}

/// Cursor state of the prediction screen. The form values live in the router's page.
pub struct PredictionState {
    focus: Focus,
    selected: usize,
    /// Index into the page's fields, one past the last field is the submit button.
    cursor: usize,
    editing: Option<String>,
    error: Option<String>,
}

impl PredictionState {
    pub fn new(router: &PageRouter) -> Self {
        Self {
            focus: Focus::Sidebar,
            selected: router.page().disease().index(),
            cursor: 0,
            editing: None,
            error: None,
        }
    }

    fn on_button(&self, router: &PageRouter) -> bool {
        self.cursor == router.page().fields().len()
    }
}

pub fn handle_key(state: &mut PredictionState, key: KeyCode, router: &mut PageRouter) -> Action {
    match state.focus {
        Focus::Sidebar => handle_sidebar(state, key, router),
        Focus::Form => handle_form(state, key, router),
    }
}

fn handle_sidebar(state: &mut PredictionState, key: KeyCode, router: &mut PageRouter) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            if state.selected > 0 {
                state.selected -= 1;
                select(state, router);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected < Disease::ALL.len() - 1 {
                state.selected += 1;
                select(state, router);
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
            state.focus = Focus::Form;
        }
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }

    Action::None
}

fn select(state: &mut PredictionState, router: &mut PageRouter) {
    if let Some(disease) = Disease::from_index(state.selected) {
        router.select(disease);
        state.cursor = 0;
        state.editing = None;
        state.error = None;
    }
}

fn handle_form(state: &mut PredictionState, key: KeyCode, router: &mut PageRouter) -> Action {
    let n_fields = router.page().fields().len();
    let on_button = state.on_button(router);

    match key {
        KeyCode::Esc => {
            state.editing = None;
            state.error = None;
            state.focus = Focus::Sidebar;
        }
        KeyCode::Up | KeyCode::BackTab => {
            if commit(state, router) {
                state.cursor = state.cursor.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Tab => {
            if commit(state, router) {
                state.cursor = (state.cursor + 1).min(n_fields);
            }
        }
        KeyCode::Enter if on_button => {
            let outcome = router.submit();
            debug!("submit outcome: {outcome:?}");
        }
        KeyCode::Enter => {
            if commit(state, router) {
                state.cursor += 1;
            }
        }
        KeyCode::Left | KeyCode::Right if !on_button => {
            if commit(state, router) {
                nudge(state, router, key == KeyCode::Right);
            }
        }
        KeyCode::Backspace => {
            if let Some(buffer) = state.editing.as_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) if !on_button && accepts(c) && !is_choice(state, router) => {
            state.editing.get_or_insert_with(String::new).push(c);
            state.error = None;
        }
        KeyCode::Char('q') if state.editing.is_none() => return Action::Quit,
        _ => {}
    }

    Action::None
}

fn accepts(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

fn is_choice(state: &PredictionState, router: &PageRouter) -> bool {
    router
        .page()
        .fields()
        .get(state.cursor)
        .is_some_and(|f| matches!(f.kind, FieldKind::Choice(_)))
}

/// Stores the text being typed into the focused field.
///
/// Returns `false` and keeps the text for correction when it is rejected.
fn commit(state: &mut PredictionState, router: &mut PageRouter) -> bool {
    let Some(text) = state.editing.take() else {
        return true;
    };
    let Some(spec) = router.page().fields().get(state.cursor) else {
        return true;
    };
    if text.trim().is_empty() {
        return true;
    }

    match router.page_mut().form.set_text(spec.key, &text) {
        Ok(_) => {
            router.page_mut().clear_outcome();
            state.error = None;
            true
        }
        Err(e) => {
            state.error = Some(e.to_string());
            state.editing = Some(text);
            false
        }
    }
}

fn nudge(state: &mut PredictionState, router: &mut PageRouter, up: bool) {
    let Some(spec) = router.page().fields().get(state.cursor) else {
        return;
    };

    let page = router.page_mut();
    let result = if up {
        page.form.increment(spec.key)
    } else {
        page.form.decrement(spec.key)
    };

    match result {
        Ok(_) => {
            page.clear_outcome();
            state.error = None;
        }
        Err(e) => state.error = Some(e.to_string()),
    }
}

pub fn draw(f: &mut Frame, state: &PredictionState, router: &PageRouter) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let (sidebar_area, page_area) = layout::split_sidebar(area);
    widgets::sidebar(
        f,
        sidebar_area,
        router,
        state.selected,
        state.focus == Focus::Sidebar,
    );

    draw_page(f, page_area, state, router);
}

fn draw_page(f: &mut Frame, area: Rect, state: &PredictionState, router: &PageRouter) {
    let page = router.page();
    let area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    let form_focused = state.focus == Focus::Form;

    let banner = match page.outcome() {
        Some(outcome) => Some(outcome.clone()),
        None if !router.is_available() => Some(Outcome::Error(
            DiagnosisErr::PredictionUnavailable {
                disease: page.disease(),
            }
            .to_string(),
        )),
        None => None,
    };
    let banner_height = banner
        .as_ref()
        .map_or(0, |b| widgets::outcome_height(b, area.width));
    let areas = layout::page(area, banner_height);

    f.render_widget(
        Paragraph::new(Span::styled(page.title(), Theme::title())),
        areas.title,
    );

    let page_fields = page.fields();
    let columns: Vec<Vec<_>> = (0..fields::COLUMNS)
        .map(|column| fields::in_column(page_fields, column).collect())
        .collect();
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let focus_row = page_fields.get(state.cursor).and_then(|focused| {
        columns[focused.column]
            .iter()
            .position(|(index, _)| *index == state.cursor)
    });
    let grid = layout::field_grid(areas.form.height, rows, focus_row.filter(|_| form_focused));

    for (column, column_area) in columns.into_iter().zip(layout::form_columns(areas.form)) {
        let visible = column.into_iter().skip(grid.offset);

        for ((index, spec), row) in visible.zip(layout::field_rows(column_area, grid)) {
            let focused = form_focused && state.cursor == index;
            let text = match (&state.editing, focused) {
                (Some(buffer), true) => FieldText::Editing(buffer),
                _ => FieldText::Value {
                    text: spec.display(page.form.get(spec.key)),
                    provided: page.form.is_provided(spec.key),
                },
            };
            widgets::field(f, row, spec, text, focused);
        }
    }

    widgets::button(
        f,
        areas.button,
        page.button_label(),
        form_focused && state.on_button(router),
    );

    if let Some(banner) = &banner {
        widgets::outcome(f, areas.outcome, banner);
    }

    match &state.error {
        Some(err) => widgets::error_bar(f, areas.footer, err),
        None if form_focused => widgets::hints(
            f,
            areas.footer,
            &[
                ("↑↓", "field"),
                ("←→", "step / option"),
                ("enter", "next / submit"),
                ("esc", "sidebar"),
            ],
        ),
        None => widgets::hints(
            f,
            areas.footer,
            &[("↑↓ / j k", "page"), ("enter", "fill in"), ("q", "quit")],
        ),
    }
}

#[cfg(test)]
mod tests {
    use diagnosis::ModelRegistry;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn router() -> PageRouter {
        PageRouter::new(ModelRegistry::new())
    }

    fn press(state: &mut PredictionState, router: &mut PageRouter, keys: &[KeyCode]) {
        for key in keys {
            handle_key(state, *key, router);
        }
    }

    #[test]
    fn sidebar_selects_pages() {
        let mut router = router();
        let mut state = PredictionState::new(&router);

        press(&mut state, &mut router, &[KeyCode::Down, KeyCode::Down, KeyCode::Down]);
        assert_eq!(router.page().disease(), Disease::Parkinsons);

        press(&mut state, &mut router, &[KeyCode::Up]);
        assert_eq!(router.page().disease(), Disease::HeartDisease);
    }

    #[test]
    fn typed_value_is_committed_on_move() {
        let mut router = router();
        let mut state = PredictionState::new(&router);

        press(
            &mut state,
            &mut router,
            &[
                KeyCode::Enter,
                KeyCode::Char('0'),
                KeyCode::Down,
                KeyCode::Char('1'),
                KeyCode::Char('2'),
                KeyCode::Char('0'),
                KeyCode::Enter,
            ],
        );

        let form = &router.page().form;
        assert!(form.is_provided("Pregnancies"));
        assert_eq!(form.get("Pregnancies"), 0.);
        assert_eq!(form.get("Glucose"), 120.);
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn rejected_text_keeps_the_cursor() {
        let mut router = router();
        let mut state = PredictionState::new(&router);

        press(
            &mut state,
            &mut router,
            &[
                KeyCode::Enter,
                KeyCode::Char('1'),
                KeyCode::Char('.'),
                KeyCode::Char('5'),
                KeyCode::Down,
            ],
        );

        assert_eq!(state.cursor, 0);
        assert_eq!(state.editing.as_deref(), Some("1.5"));
        assert!(state.error.is_some());
        assert!(!router.page().form.is_provided("Pregnancies"));
    }

    #[test]
    fn arrows_cycle_choice_options() {
        let mut router = router();
        let mut state = PredictionState::new(&router);

        press(&mut state, &mut router, &[KeyCode::Down, KeyCode::Enter, KeyCode::Down]);
        assert_eq!(router.page().fields()[state.cursor].key, "sex");

        press(&mut state, &mut router, &[KeyCode::Char('7'), KeyCode::Right]);
        assert_eq!(router.page().form.get("sex"), 1.);
        assert!(state.editing.is_none());
    }

    #[test]
    fn enter_on_button_submits() {
        let mut router = router();
        let mut state = PredictionState::new(&router);

        state.focus = Focus::Form;
        state.cursor = router.page().fields().len();
        press(&mut state, &mut router, &[KeyCode::Enter]);

        assert!(matches!(router.page().outcome(), Some(Outcome::Error(_))));
    }

    /// Draws the screen on a terminal of `width` by `height` and returns its text, one
    /// line per row.
    fn render(state: &PredictionState, router: &PageRouter, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, state, router)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer.get(x, y).symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn focus_on(state: &mut PredictionState, router: &PageRouter, key: &str) {
        state.focus = Focus::Form;
        state.cursor = router
            .page()
            .fields()
            .iter()
            .position(|f| f.key == key)
            .unwrap();
    }

    #[test]
    fn every_parkinsons_value_is_drawn_on_a_small_terminal() {
        let mut router = router();
        let mut state = PredictionState::new(&router);
        router.select(Disease::Parkinsons);
        router.page_mut().form.set("PPE", 0.41).unwrap();
        focus_on(&mut state, &router, "PPE");

        let screen = render(&state, &router, 80, 24);

        assert!(screen.contains("0.41"), "{screen}");
        assert_eq!(screen.matches("0.00").count(), 21, "{screen}");
        assert!(screen.contains("PPE"), "{screen}");
        assert!(screen.contains("unavailable"), "{screen}");
        assert!(screen.contains("made"), "{screen}");
    }

    #[test]
    fn text_being_typed_is_drawn_with_its_cursor() {
        let mut router = router();
        let mut state = PredictionState::new(&router);
        router.select(Disease::Parkinsons);
        focus_on(&mut state, &router, "D2");
        state.editing = Some("2.4".into());

        let screen = render(&state, &router, 80, 24);

        assert!(screen.contains("2.4█"), "{screen}");
    }

    #[test]
    fn focused_heart_choice_shows_its_caption() {
        let mut router = router();
        let mut state = PredictionState::new(&router);
        router.select(Disease::HeartDisease);
        focus_on(&mut state, &router, "thal");

        let screen = render(&state, &router, 80, 24);

        assert!(screen.contains("◀ Normal ▶"), "{screen}");
        assert_eq!(screen.matches("0.0").count(), 6, "{screen}");
    }

    #[test]
    fn roomy_terminal_keeps_the_boxes() {
        let mut router = router();
        let mut state = PredictionState::new(&router);
        router.select(Disease::Diabetes);
        focus_on(&mut state, &router, "Glucose");

        let screen = render(&state, &router, 120, 40);

        assert!(screen.contains(" Glucose Level "), "{screen}");
        assert!(screen.contains("┌"), "{screen}");
    }
}
