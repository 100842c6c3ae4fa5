use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

mod calendar;
mod details;
mod help;

pub use calendar::draw_calendar;
pub use details::{draw_day_modal, draw_details, draw_header};
pub use help::draw_help_overlay;

/// Bold coloured section title.
pub(crate) fn heading(text: &str, color: Color) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
