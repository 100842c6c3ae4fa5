pub mod aggregate;
pub mod collect;
pub mod drill;
pub mod exec;
pub mod grid;
pub mod intensity;
pub mod output;
pub mod window;

pub use aggregate::{ActivityTable, DayBreakdown, RepoCount, RepoId};
pub use collect::{aggregate_results, collect_activity, collect_root, RepoOutcome, RunReport, RunStatus};
pub use drill::{resolve, DrillDown};
pub use grid::{CalendarGrid, GridCell, MonthLabel};
pub use intensity::{Shading, ShadingMode, Thresholds};
pub use window::CalendarWindow;

use crate::git::DateSource;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// One aggregation run laid out on the calendar ending at `today`.
#[derive(Clone, Debug)]
pub struct ActivityMap {
    pub root: PathBuf,
    pub table: ActivityTable,
    pub report: RunReport,
    pub grid: CalendarGrid,
    pub shading: Shading,
}

impl ActivityMap {
    pub fn build(
        root: &Path,
        source: &dyn DateSource,
        today: NaiveDate,
        shading: Shading,
        show_progress: bool,
    ) -> Self {
        let (table, report) = collect_root(root, source, show_progress);
        Self::from_parts(root.to_path_buf(), table, report, today, shading)
    }

    pub fn from_parts(
        root: PathBuf,
        table: ActivityTable,
        report: RunReport,
        today: NaiveDate,
        shading: Shading,
    ) -> Self {
        Self {
            root,
            table,
            report,
            grid: CalendarGrid::new(CalendarWindow::ending(today)),
            shading,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.report.status(&self.table)
    }

    pub fn today(&self) -> NaiveDate {
        self.grid.window().today()
    }

    pub fn resolve(&self, row: usize, column: usize) -> DrillDown {
        resolve(&self.grid, &self.table, row, column)
    }

    /// Busiest day inside the displayed window.
    pub fn max_in_window(&self) -> u32 {
        let window = self.grid.window();
        self.table.max_total_between(window.start(), window.today())
    }

    pub fn count_at(&self, row: usize, column: usize) -> Option<u32> {
        self.grid
            .cell(row, column)
            .date()
            .map(|date| self.table.total(date))
    }

    pub fn level_of(&self, count: u32) -> usize {
        self.shading.classify(count, self.max_in_window())
    }

    pub fn level_at(&self, row: usize, column: usize) -> Option<usize> {
        self.count_at(row, column).map(|count| self.level_of(count))
    }

    /// Commits that fall inside the displayed window.
    pub fn commits_in_window(&self) -> u64 {
        let window = self.grid.window();
        self.table
            .totals()
            .range(window.start()..=window.today())
            .map(|(_, &c)| c as u64)
            .sum()
    }
}
