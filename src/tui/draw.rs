use ratatui::style::{Color, Modifier, Style};

use crate::activity::output::{palette_slot, PALETTE_RGB};

pub const EMPTY_GLYPH: &str = "·";
pub const DAY_GLYPH: &str = "■";
pub const SELECTED_GLYPH: &str = "▣";

pub fn level_color(level: usize, levels: usize) -> Color {
    let (r, g, b) = PALETTE_RGB[palette_slot(level, levels)];
    Color::Rgb(r, g, b)
}

pub fn cell_style(level: usize, levels: usize, selected: bool) -> Style {
    let style = Style::default().fg(level_color(level, levels));
    if selected {
        style.bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn cell_glyph(level: usize, selected: bool) -> &'static str {
    match (selected, level) {
        (true, _) => SELECTED_GLYPH,
        (false, 0) => EMPTY_GLYPH,
        (false, _) => DAY_GLYPH,
    }
}
