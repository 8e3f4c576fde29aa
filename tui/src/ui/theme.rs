use ratatui::style::{Color, Modifier, Style};

/// Clinical light-on-dark theme.
///
/// Verdicts borrow the usual traffic-light colors: red for a positive screening,
/// green for a negative one and amber for rejected input.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(12, 16, 24);
    pub const FG: Color = Color::Rgb(220, 228, 240);
    pub const FG_DIM: Color = Color::Rgb(140, 155, 175);
    pub const FG_MUTED: Color = Color::Rgb(80, 90, 105);

    pub const ACCENT: Color = Color::Rgb(64, 200, 220);
    pub const GREEN: Color = Color::Rgb(80, 210, 120);
    pub const AMBER: Color = Color::Rgb(255, 190, 60);
    pub const RED: Color = Color::Rgb(255, 85, 85);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Border of the widget holding the focus.
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Values the user has not entered yet.
    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn ok() -> Style {
        Style::default().fg(Self::GREEN).add_modifier(Modifier::BOLD)
    }

    pub fn warn() -> Style {
        Style::default().fg(Self::AMBER).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).add_modifier(Modifier::BOLD)
    }

    /// The button, once focused.
    pub fn button_focused() -> Style {
        Style::default()
            .fg(Self::BG)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }
}
