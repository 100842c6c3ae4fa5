use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// First row of every grid column.
pub const WEEK_START: Weekday = Weekday::Sun;

/// Days before "today" the trailing year starts at, before week alignment.
pub const LOOKBACK_DAYS: i64 = 364;

pub const DAYS_PER_WEEK: usize = 7;

/// Offset of `day` from the configured week start (0 for `WEEK_START`).
pub fn days_since_week_start(day: Weekday) -> usize {
    let day = day.num_days_from_monday() as usize;
    let start = WEEK_START.num_days_from_monday() as usize;
    (DAYS_PER_WEEK + day - start) % DAYS_PER_WEEK
}

/// Contiguous run of days from a week-aligned start through `today`.
///
/// The final week may be partial: the window ends exactly at `today` and is never
/// padded into the future. `span_len` covers the whole weeks the days occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarWindow {
    start: NaiveDate,
    today: NaiveDate,
}

impl CalendarWindow {
    pub fn ending(today: NaiveDate) -> Self {
        let raw_start = today - Duration::days(LOOKBACK_DAYS);
        let back = days_since_week_start(raw_start.weekday()) as i64;
        Self {
            start: raw_start - Duration::days(back),
            today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Number of real days in the window, `today` included.
    pub fn len(&self) -> usize {
        ((self.today - self.start).num_days() + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn weeks(&self) -> usize {
        self.len().div_ceil(DAYS_PER_WEEK)
    }

    /// Length of the window rounded up to whole weeks.
    pub fn span_len(&self) -> usize {
        self.weeks() * DAYS_PER_WEEK
    }

    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        if index < self.len() {
            Some(self.start + Duration::days(index as i64))
        } else {
            None
        }
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start || date > self.today {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}
