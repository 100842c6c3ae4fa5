use chrono::{Datelike, NaiveDate};

use super::window::{CalendarWindow, DAYS_PER_WEEK};

pub const ROWS: usize = DAYS_PER_WEEK;
pub const MAX_COLUMNS: usize = 53;

pub const WEEKDAY_LABELS: [&str; ROWS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// What a grid coordinate holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridCell {
    Day(NaiveDate),
    /// Past `today` in the last column, or outside the grid altogether.
    OutOfWindow,
}

impl GridCell {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            GridCell::Day(date) => Some(date),
            GridCell::OutOfWindow => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthLabel {
    pub column: usize,
    pub label: String,
}

/// Row-per-weekday, column-per-week layout of a calendar window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarGrid {
    window: CalendarWindow,
    columns: usize,
}

impl CalendarGrid {
    pub fn new(window: CalendarWindow) -> Self {
        Self {
            window,
            columns: window.weeks().min(MAX_COLUMNS),
        }
    }

    pub fn window(&self) -> &CalendarWindow {
        &self.window
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> GridCell {
        if row >= ROWS || column >= self.columns {
            return GridCell::OutOfWindow;
        }
        match self.window.get(column * ROWS + row) {
            Some(date) => GridCell::Day(date),
            None => GridCell::OutOfWindow,
        }
    }

    /// `(row, column)` of `date`, if it is drawn.
    pub fn position(&self, date: NaiveDate) -> Option<(usize, usize)> {
        let index = self.window.index_of(date)?;
        let (row, column) = (index % ROWS, index / ROWS);
        (column < self.columns).then_some((row, column))
    }

    /// Column 0 is always labelled; any other column is labelled when its first
    /// day falls in the first week of a month.
    pub fn month_label(&self, column: usize) -> Option<String> {
        let first = self.cell(0, column).date()?;
        if column == 0 || first.day() <= 7 {
            Some(first.format("%b").to_string())
        } else {
            None
        }
    }

    pub fn month_labels(&self) -> Vec<MonthLabel> {
        (0..self.columns)
            .filter_map(|column| {
                self.month_label(column)
                    .map(|label| MonthLabel { column, label })
            })
            .collect()
    }

    /// Every drawn day with its coordinates, in calendar order.
    pub fn days(&self) -> impl Iterator<Item = (usize, usize, NaiveDate)> + '_ {
        (0..self.columns).flat_map(move |column| {
            (0..ROWS).filter_map(move |row| {
                self.cell(row, column).date().map(|date| (row, column, date))
            })
        })
    }
}
