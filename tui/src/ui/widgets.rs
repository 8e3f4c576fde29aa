use diagnosis::{Disease, FieldKind, FieldSpec, LoadFailure, Outcome, PageRouter};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{layout::FIELD_HEIGHT, theme::Theme};

pub const APP_TITLE: &str = "Disease Prediction";

/// Draws the page selector, marking pages whose model failed to load.
pub fn sidebar(f: &mut Frame, area: Rect, router: &PageRouter, selected: usize, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(format!(" {APP_TITLE} "))
        .title_alignment(Alignment::Center)
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let failures = router.registry().failures();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Disease::ALL.len() as u16 * 2 + 1),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut lines = vec![Line::from("")];
    for disease in Disease::ALL {
        let is_selected = disease.index() == selected;
        let style = if is_selected {
            Theme::accent()
        } else {
            Theme::dim()
        };
        let prefix = if is_selected { "▶ " } else { "  " };

        let mut spans = vec![
            Span::styled(prefix, style),
            Span::styled(disease.menu_label(), style),
        ];
        if router.registry().get_for(disease).is_none() {
            spans.push(Span::styled(" ✖", Theme::error()));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines), rows[0]);

    if !failures.is_empty() {
        f.render_widget(load_warnings(failures), rows[1]);
    }
}

/// Startup problems, one line per model that could not be loaded.
pub fn load_warnings(failures: &[LoadFailure]) -> Paragraph<'_> {
    let lines: Vec<Line> = failures
        .iter()
        .map(|failure| {
            Line::from(vec![
                Span::styled("⚠ ", Theme::warn()),
                Span::styled(failure.to_string(), Theme::dim()),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Theme::border())
                .title(" unavailable ")
                .title_style(Theme::warn()),
        )
        .wrap(Wrap { trim: true })
}

/// The text currently shown in an input box.
pub enum FieldText<'a> {
    /// What the user is typing right now.
    Editing(&'a str),
    Value { text: String, provided: bool },
}

/// Draws one labeled input, as a bordered box when `area` is tall enough for one and as a
/// `label  value` line otherwise.
pub fn field(f: &mut Frame, area: Rect, spec: &FieldSpec, text: FieldText<'_>, focused: bool) {
    let value = value_line(spec, text, focused);
    let label_style = if focused { Theme::accent() } else { Theme::dim() };

    if area.height >= FIELD_HEIGHT {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(format!(" {} ", spec.label))
            .title_style(label_style);

        f.render_widget(Paragraph::new(value).block(block), area);
        return;
    }

    // the value keeps its width, the label gets truncated
    let value_width = (value.width() as u16 + 1).min(area.width);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(value_width)])
        .split(area);

    let marker = if focused { "▶" } else { " " };
    f.render_widget(
        Paragraph::new(Span::styled(format!("{marker}{}", spec.label), label_style)),
        cols[0],
    );
    f.render_widget(Paragraph::new(value).alignment(Alignment::Right), cols[1]);
}

fn value_line(spec: &FieldSpec, text: FieldText<'_>, focused: bool) -> Line<'static> {
    match text {
        FieldText::Editing(buffer) => Line::from(vec![
            Span::styled(buffer.to_string(), Theme::text()),
            Span::styled("█", Theme::accent()),
        ]),
        FieldText::Value { text, provided } => {
            let style = if provided { Theme::text() } else { Theme::muted() };
            match spec.kind {
                FieldKind::Choice(_) if focused => Line::from(vec![
                    Span::styled("◀ ", Theme::accent()),
                    Span::styled(text, style),
                    Span::styled(" ▶", Theme::accent()),
                ]),
                _ => Line::from(Span::styled(text, style)),
            }
        }
    }
}

pub fn button(f: &mut Frame, area: Rect, label: &str, focused: bool) {
    let width = (label.chars().count() as u16 + 6).min(area.width);
    let area = Rect { width, ..area };

    let style = if focused {
        Theme::button_focused()
    } else {
        Theme::text()
    };

    f.render_widget(
        Paragraph::new(Span::styled(label.to_string(), style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if focused {
                        Theme::border_focused()
                    } else {
                        Theme::border()
                    }),
            ),
        area,
    );
}

fn banner(outcome: &Outcome) -> (&'static str, String, Style) {
    match outcome {
        Outcome::Verdict(result) if result.is_positive() => {
            ("✖ ", result.message(), Theme::error())
        }
        Outcome::Verdict(result) => ("✔ ", result.message(), Theme::ok()),
        Outcome::Warning(msg) => ("⚠ ", msg.clone(), Theme::warn()),
        Outcome::Error(msg) => ("✖ ", msg.clone(), Theme::error()),
    }
}

/// Lines the banner of `outcome` takes when drawn `width` columns wide, borders included.
pub fn outcome_height(outcome: &Outcome, width: u16) -> u16 {
    let (icon, message, _) = banner(outcome);
    let inner = usize::from(width.saturating_sub(2)).max(1);

    wrapped_lines(&format!("{icon}{message}"), inner) as u16 + 2
}

/// Counts the lines a greedy word wrap of `text` at `width` columns produces.
fn wrapped_lines(text: &str, width: usize) -> usize {
    let mut lines = 1;
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };

        if needed <= width {
            used = needed;
        } else if used == 0 {
            lines += (len - 1) / width;
            used = (len - 1) % width + 1;
        } else {
            lines += 1 + (len - 1) / width;
            used = (len - 1) % width + 1;
        }
    }

    lines
}

/// Draws the banner of the last submit: red for a positive screening, green for a negative one.
pub fn outcome(f: &mut Frame, area: Rect, outcome: &Outcome) {
    let (icon, message, style) = banner(outcome);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(icon, style),
            Span::styled(message, style),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true }),
        area,
    );
}

/// One-line error shown under the page, used for rejected keystrokes.
pub fn error_bar(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ✖ ", Theme::error()),
            Span::styled(msg.to_string(), Theme::error()),
        ])),
        area,
    );
}

/// Renders `[key] action` pairs on a single line.
pub fn hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!("[{key}]"), Theme::accent()),
                Span::styled(format!(" {action}   "), Theme::muted()),
            ]
        })
        .collect();

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrapped_lines("You have Diabetes", 40), 1);
        assert_eq!(wrapped_lines("You have Diabetes", 10), 2);
        assert_eq!(wrapped_lines("aaaa bbbb cccc", 9), 2);
        assert_eq!(wrapped_lines("abcdefghijkl", 5), 3);
    }
}
