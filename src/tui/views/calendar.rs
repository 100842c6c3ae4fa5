use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::activity::grid::WEEKDAY_LABELS;
use crate::activity::output::{month_header, no_data_message};
use crate::activity::ActivityMap;

use super::super::draw::{cell_glyph, cell_style, level_color, DAY_GLYPH, EMPTY_GLYPH};
use super::super::layout::GUTTER;
use super::super::state::TuiState;

/// Month header, one line per weekday and the legend, inside a bordered block.
pub fn draw_calendar(f: &mut Frame, area: Rect, map: &ActivityMap, state: &TuiState) {
    let window = map.grid.window();
    let block = Block::default()
        .title(format!(" Commit Activity {} → {} ", window.start(), window.today()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if let Some(message) = no_data_message(map) {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
            Line::from(""),
            Line::from("Press 'r' to scan again or 'q' to quit."),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let gutter = GUTTER as usize;
    let levels = map.shading.levels();
    let mut lines = Vec::with_capacity(map.grid.rows() + 3);
    lines.push(Line::from(Span::styled(
        month_header(&map.grid, gutter),
        Style::default().fg(Color::Cyan),
    )));

    for (row, weekday) in WEEKDAY_LABELS.iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{weekday:<gutter$}"),
            Style::default().fg(Color::DarkGray),
        )];
        for column in 0..map.grid.columns() {
            match map.level_at(row, column) {
                Some(level) => {
                    let selected = (row, column) == (state.row, state.column);
                    spans.push(Span::styled(
                        cell_glyph(level, selected),
                        cell_style(level, levels, selected),
                    ));
                }
                None => spans.push(Span::raw(" ")),
            }
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let mut legend = vec![Span::raw(format!("{:<gutter$}", "")), Span::raw("Less ")];
    for level in 0..levels {
        let glyph = if level == 0 { EMPTY_GLYPH } else { DAY_GLYPH };
        legend.push(Span::styled(
            glyph,
            Style::default().fg(level_color(level, levels)),
        ));
        legend.push(Span::styled(
            format!(" {}  ", map.shading.label(level)),
            Style::default().fg(Color::Gray),
        ));
    }
    legend.push(Span::raw("More"));
    lines.push(Line::from(legend));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
