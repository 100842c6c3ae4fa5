use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Columns taken by the weekday labels left of the grid.
pub const GUTTER: u16 = 4;
/// Terminal columns per week: glyph plus a space.
pub const CELL_WIDTH: u16 = 2;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

pub struct MainLayout {
    pub header: Rect,
    pub calendar: Rect,
    pub details: Rect,
}

/// Header, calendar (month row + 7 weekday rows + legend inside a border), details.
pub fn main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);
    MainLayout {
        header: chunks[0],
        calendar: chunks[1],
        details: chunks[2],
    }
}

/// Map a terminal position inside the bordered calendar block to `(row, column)`.
pub fn cell_at(calendar: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
    let left = calendar.x + 1 + GUTTER;
    let top = calendar.y + 2;
    if x < left || y < top {
        return None;
    }
    let row = (y - top) as usize;
    let column = ((x - left) / CELL_WIDTH) as usize;
    if row >= crate::activity::grid::ROWS || x >= calendar.x + calendar.width.saturating_sub(1) {
        return None;
    }
    Some((row, column))
}
