use super::aggregate::{ActivityTable, DayBreakdown};
use super::grid::CalendarGrid;

/// Result of selecting a grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillDown {
    /// The cell has no day behind it.
    NoData,
    Day(DayBreakdown),
}

impl DrillDown {
    pub fn day(&self) -> Option<&DayBreakdown> {
        match self {
            DrillDown::Day(day) => Some(day),
            DrillDown::NoData => None,
        }
    }
}

pub fn resolve(grid: &CalendarGrid, table: &ActivityTable, row: usize, column: usize) -> DrillDown {
    match grid.cell(row, column).date() {
        Some(date) => DrillDown::Day(table.breakdown(date)),
        None => DrillDown::NoData,
    }
}
