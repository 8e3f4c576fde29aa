use ratatui::layout::{Constraint, Direction, Layout, Rect};

use diagnosis::fields::COLUMNS;

const SIDEBAR_WIDTH: u16 = 26;
/// Height of a bordered input box.
pub const FIELD_HEIGHT: u16 = 3;

/// Regions of the prediction page, top to bottom.
pub struct PageAreas {
    pub title: Rect,
    pub form: Rect,
    pub button: Rect,
    pub outcome: Rect,
    pub footer: Rect,
}

/// Splits the screen into (sidebar, page).
pub fn split_sidebar(area: Rect) -> (Rect, Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    (cols[0], cols[1])
}

/// Splits the page, giving the outcome banner `outcome_height` lines and the form the rest.
pub fn page(area: Rect, outcome_height: u16) -> PageAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(outcome_height),
            Constraint::Length(1),
        ])
        .split(area);

    PageAreas {
        title: rows[0],
        form: rows[1],
        button: rows[2],
        outcome: rows[3],
        footer: rows[4],
    }
}

/// Splits the form into its input columns.
pub fn form_columns(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
        .split(area)
        .to_vec()
}

/// How the input rows of a form fit in the space left for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGrid {
    /// [`FIELD_HEIGHT`] for bordered boxes, 1 for `label value` lines.
    pub row_height: u16,
    /// First row drawn, the ones above are scrolled out.
    pub offset: usize,
    /// Amount of rows drawn from `offset` on.
    pub visible: usize,
}

/// Uses bordered boxes when all `rows` fit in `height` and single lines otherwise, then
/// scrolls just enough to keep `focus_row` in view.
pub fn field_grid(height: u16, rows: usize, focus_row: Option<usize>) -> FieldGrid {
    let row_height = if rows * FIELD_HEIGHT as usize <= height as usize {
        FIELD_HEIGHT
    } else {
        1
    };
    let visible = ((height / row_height) as usize).min(rows);

    let offset = match focus_row {
        Some(row) if visible > 0 && row >= visible => row + 1 - visible,
        _ => 0,
    };

    FieldGrid {
        row_height,
        offset,
        visible,
    }
}

/// Stacks the visible rows of `grid` from the top of `column`.
pub fn field_rows(column: Rect, grid: FieldGrid) -> Vec<Rect> {
    (0..grid.visible)
        .map(|i| Rect {
            y: column.y + i as u16 * grid.row_height,
            height: grid.row_height,
            ..column
        })
        .collect()
}

/// A rect of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
