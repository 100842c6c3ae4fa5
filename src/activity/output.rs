use crate::model::{
    ColumnLabel, DayCell, DayOutput, LevelLegend, MapOutput, ScanOutput, SCHEMA_VERSION,
};
use anyhow::Result;
use chrono::Utc;
use console::{style, Style};
use serde::Serialize;

use super::grid::{CalendarGrid, WEEKDAY_LABELS};
use super::{ActivityMap, DrillDown, RepoOutcome, RunStatus};

/// RGB shades from empty to busiest, GitHub style.
pub const PALETTE_RGB: [(u8, u8, u8); 6] = [
    (235, 237, 240),
    (201, 240, 212),
    (127, 213, 148),
    (38, 166, 91),
    (0, 109, 44),
    (0, 68, 27),
];

const PALETTE_256: [u8; 6] = [240, 157, 114, 34, 28, 22];

const GUTTER: usize = 4;

/// Spread `levels` levels over the palette; level 0 always gets the empty shade.
pub fn palette_slot(level: usize, levels: usize) -> usize {
    let top = PALETTE_RGB.len() - 1;
    if level == 0 || levels <= 1 {
        return 0;
    }
    let busy_levels = levels - 1;
    if busy_levels == 1 {
        return top;
    }
    1 + (level.min(busy_levels) - 1) * (top - 1) / (busy_levels - 1)
}

pub fn map_output(map: &ActivityMap) -> MapOutput {
    let status = map.status();
    let window = map.grid.window();
    let days = if status == RunStatus::Ready {
        map.grid
            .days()
            .map(|(row, column, date)| {
                let count = map.table.total(date);
                DayCell {
                    date,
                    row,
                    column,
                    count,
                    level: map.level_of(count),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    MapOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        root: map.root.to_string_lossy().to_string(),
        status,
        today: window.today(),
        window_start: window.start(),
        rows: map.grid.rows(),
        columns: map.grid.columns(),
        total_commits: map.commits_in_window(),
        shading: format!("{:?}", map.shading.mode()).to_lowercase(),
        legend: (0..map.shading.levels())
            .map(|level| LevelLegend {
                level,
                label: map.shading.label(level),
            })
            .collect(),
        month_labels: map
            .grid
            .month_labels()
            .into_iter()
            .map(|m| ColumnLabel {
                column: m.column,
                label: m.label,
            })
            .collect(),
        days,
        repositories: map.report.outcomes.clone(),
        root_error: map.report.root_error.clone(),
    }
}

pub fn day_output(drill: &DrillDown) -> DayOutput {
    match drill {
        DrillDown::NoData => DayOutput {
            version: SCHEMA_VERSION,
            date: None,
            available: false,
            total: 0,
            repositories: Vec::new(),
        },
        DrillDown::Day(day) => DayOutput {
            version: SCHEMA_VERSION,
            date: Some(day.date),
            available: true,
            total: day.total,
            repositories: day.repositories.clone(),
        },
    }
}

pub fn scan_output(map: &ActivityMap) -> ScanOutput {
    ScanOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        root: map.root.to_string_lossy().to_string(),
        status: map.status(),
        total_commits: map.table.total_commits(),
        root_error: map.report.root_error.clone(),
        repositories: map.report.outcomes.clone(),
    }
}

pub fn output_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_ndjson(map: &ActivityMap) -> Result<()> {
    for day in map_output(map).days {
        println!("{}", serde_json::to_string(&day)?);
    }
    Ok(())
}

pub(crate) fn no_data_message(map: &ActivityMap) -> Option<String> {
    match map.status() {
        RunStatus::Ready => None,
        RunStatus::NoRepositories => Some(match &map.report.root_error {
            Some(err) => format!("No repositories found: {err}"),
            None => format!("No repositories found in {}", map.root.display()),
        }),
        RunStatus::NoCommits => Some("No commits found in the repositories.".to_string()),
    }
}

fn level_style(level: usize, levels: usize) -> Style {
    Style::new().color256(PALETTE_256[palette_slot(level, levels)])
}

/// Month names positioned over their columns, skipping any that would collide.
pub fn month_header(grid: &CalendarGrid, gutter: usize) -> String {
    let width = gutter + grid.columns() * 2;
    let mut line = vec![' '; width];
    let mut next_free = 0;
    for label in grid.month_labels() {
        let at = gutter + label.column * 2;
        if at < next_free {
            continue;
        }
        for (i, ch) in label.label.chars().enumerate() {
            if at + i < width {
                line[at + i] = ch;
            }
        }
        next_free = at + label.label.chars().count() + 1;
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

pub fn output_calendar(map: &ActivityMap) -> Result<()> {
    if let Some(message) = no_data_message(map) {
        println!("{message}");
        print_skipped(map);
        return Ok(());
    }

    let window = map.grid.window();
    let levels = map.shading.levels();

    println!(
        "{} {} → {}",
        style("Commit Activity").bold(),
        window.start(),
        window.today()
    );
    println!("{}", month_header(&map.grid, GUTTER));

    for (row, weekday) in WEEKDAY_LABELS.iter().enumerate() {
        let mut line = format!("{weekday:<width$}", width = GUTTER);
        for column in 0..map.grid.columns() {
            match map.level_at(row, column) {
                Some(0) => line.push_str(&level_style(0, levels).apply_to("·").to_string()),
                Some(level) => line.push_str(&level_style(level, levels).apply_to("■").to_string()),
                None => line.push(' '),
            }
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }

    println!(
        "\n{} commits in the last year across {} repositories",
        style(map.commits_in_window()).green().bold(),
        map.report.scanned().count()
    );

    print!("{} ", style("Legend").bold());
    for level in 0..levels {
        let glyph = if level == 0 { "·" } else { "■" };
        print!(
            "{} {}  ",
            level_style(level, levels).apply_to(glyph),
            map.shading.label(level)
        );
    }
    println!();
    print_skipped(map);
    Ok(())
}

fn print_skipped(map: &ActivityMap) {
    let skipped: Vec<_> = map.report.skipped().collect();
    if skipped.is_empty() {
        return;
    }
    println!("\n{}", style("Skipped repositories").yellow().bold());
    for (repo, reason) in skipped {
        println!("  {repo}: {reason}");
    }
}

pub fn output_day(drill: &DrillDown) -> Result<()> {
    let day = match drill {
        DrillDown::NoData => {
            println!("No data available");
            return Ok(());
        }
        DrillDown::Day(day) => day,
    };

    if day.repositories.is_empty() {
        println!("{}: No commits on this day.", day.date);
        return Ok(());
    }

    println!("Date: {}", style(day.date).bold());
    println!("Total: {} commits\n", style(day.total).green().bold());
    for entry in &day.repositories {
        println!("- {}: {} commits", entry.repo, entry.commits);
    }
    Ok(())
}

pub fn output_scan(map: &ActivityMap) -> Result<()> {
    if let Some(err) = &map.report.root_error {
        println!("{} {err}", style("Root unavailable:").red().bold());
        return Ok(());
    }
    if map.report.outcomes.is_empty() {
        println!("No repositories found in {}", map.root.display());
        return Ok(());
    }
    for outcome in &map.report.outcomes {
        match outcome {
            RepoOutcome::Scanned { repo, commits } => {
                println!("{} {repo:<30} {commits:>6} commits", style("✓").green());
            }
            RepoOutcome::Skipped { repo, reason } => {
                println!("{} {repo:<30} {}", style("✗").red(), style(reason).dim());
            }
        }
    }
    println!(
        "\n{} commits in {} repositories ({} skipped)",
        map.table.total_commits(),
        map.report.scanned().count(),
        map.report.skipped().count()
    );
    Ok(())
}
