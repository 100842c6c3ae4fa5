use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::activity::{ActivityMap, DrillDown};
use crate::tui::centered_rect;

use super::super::draw::level_color;
use super::super::state::TuiState;
use super::{heading, truncate};

const PANEL_REPOS: usize = 8;
const MODAL_REPOS: usize = 30;

/// Title bar with the scanned folder and any transient status message.
pub fn draw_header(f: &mut Frame, area: Rect, map: &ActivityMap, state: &TuiState) {
    let mut spans = vec![
        heading("commitmap", Color::Yellow),
        Span::raw("  "),
        Span::styled(
            map.root.display().to_string(),
            Style::default().fg(Color::White),
        ),
        Span::raw(format!(
            "  {} repositories, {} skipped",
            map.report.scanned().count(),
            map.report.skipped().count()
        )),
    ];
    if let Some(message) = state.current_status() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Green),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" ? help · q quit "),
    );
    f.render_widget(paragraph, area);
}

/// Selected day on the left, run summary on the right.
pub fn draw_details(f: &mut Frame, area: Rect, map: &ActivityMap, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    f.render_widget(
        Paragraph::new(selected_day_lines(map, state)).block(
            Block::default()
                .title(" Selected Day ")
                .borders(Borders::ALL),
        ),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(summary_lines(map)).block(
            Block::default()
                .title(" Summary ")
                .borders(Borders::ALL),
        ),
        chunks[1],
    );
}

fn selected_day_lines(map: &ActivityMap, state: &TuiState) -> Vec<Line<'static>> {
    let day = match map.resolve(state.row, state.column) {
        DrillDown::NoData => return vec![Line::from("No data available")],
        DrillDown::Day(day) => day,
    };

    let level = map.level_of(day.total);
    let mut lines = vec![
        Line::from(vec![
            heading(&day.date.format("%A, %B %-d, %Y").to_string(), Color::Yellow),
        ]),
        Line::from(vec![
            Span::raw("Commits: "),
            Span::styled(
                day.total.to_string(),
                Style::default()
                    .fg(level_color(level, map.shading.levels()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (level {level}: {})", map.shading.label(level)),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(""),
    ];

    if day.repositories.is_empty() {
        lines.push(Line::from("No commits on this day."));
        return lines;
    }

    for entry in day.repositories.iter().take(PANEL_REPOS) {
        lines.push(Line::from(format!(
            "  {:<28} {:>4}",
            truncate(entry.repo.as_str(), 28),
            entry.commits
        )));
    }
    if day.repositories.len() > PANEL_REPOS {
        lines.push(Line::from(Span::styled(
            format!(
                "  … and {} more (Enter for all)",
                day.repositories.len() - PANEL_REPOS
            ),
            Style::default().fg(Color::Gray),
        )));
    }
    lines
}

fn summary_lines(map: &ActivityMap) -> Vec<Line<'static>> {
    let busiest = map.max_in_window();
    let active_days = map
        .grid
        .days()
        .filter(|&(_, _, date)| map.table.total(date) > 0)
        .count();

    let mut lines = vec![
        Line::from(format!("Commits in window: {}", map.commits_in_window())),
        Line::from(format!("Active days:       {active_days}")),
        Line::from(format!("Busiest day:       {busiest}")),
        Line::from(format!(
            "Shading:           {}",
            format!("{:?}", map.shading.mode()).to_lowercase()
        )),
    ];

    let skipped: Vec<_> = map.report.skipped().collect();
    if !skipped.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(heading("Skipped", Color::Red)));
        for (repo, reason) in skipped.iter().take(PANEL_REPOS) {
            lines.push(Line::from(format!(
                "  {}: {}",
                truncate(repo.as_str(), 20),
                truncate(reason, 40)
            )));
        }
    }
    lines
}

/// Popup listing every repository that contributed to the selected day.
pub fn draw_day_modal(f: &mut Frame, area: Rect, map: &ActivityMap, state: &TuiState) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = Vec::new();
    match map.resolve(state.row, state.column) {
        DrillDown::NoData => lines.push(Line::from("No data available")),
        DrillDown::Day(day) => {
            lines.push(Line::from(heading(
                &format!("Date: {}", day.date),
                Color::Yellow,
            )));
            lines.push(Line::from(format!("Total: {} commits", day.total)));
            lines.push(Line::from(""));

            if day.repositories.is_empty() {
                lines.push(Line::from(format!("{}: No commits on this day.", day.date)));
            }
            for entry in day.repositories.iter().take(MODAL_REPOS) {
                lines.push(Line::from(format!(
                    "- {}: {} commits",
                    truncate(entry.repo.as_str(), 50),
                    entry.commits
                )));
            }
            if day.repositories.len() > MODAL_REPOS {
                lines.push(Line::from(format!(
                    "  … and {} more",
                    day.repositories.len() - MODAL_REPOS
                )));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to close",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Day Drill-down")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(paragraph, popup);
}
