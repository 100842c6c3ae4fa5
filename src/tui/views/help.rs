use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

use super::heading;

/// Draw the modal help overlay describing navigation and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(60, 70, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(heading("commitmap - Help", Color::Yellow)),
        Line::from(""),
        Line::from(heading("Navigation:", Color::Green)),
        Line::from("  ←/→ or h/l  Previous / next week"),
        Line::from("  ↑/↓ or k/j  Previous / next weekday"),
        Line::from("  Home / g    Oldest week"),
        Line::from("  End / G     Today"),
        Line::from("  Mouse       Click a day, scroll to change week"),
        Line::from(""),
        Line::from(heading("Actions:", Color::Green)),
        Line::from("  Enter       Show every repository for the day"),
        Line::from("  r           Scan the repositories again"),
        Line::from(""),
        Line::from(heading("General:", Color::Green)),
        Line::from("  ?, F1       Toggle this help"),
        Line::from("  q, Esc      Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "Press '?' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
