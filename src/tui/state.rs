use std::time::Instant;

use crate::activity::ActivityMap;

pub struct TuiState {
    pub row: usize,
    pub column: usize,
    pub show_help: bool,
    pub show_day_modal: bool,
    pub status_message: Option<(String, Instant)>,
    pub last_refresh: Option<Instant>,
}

impl TuiState {
    /// Start with the cursor on today's cell.
    pub fn focused_on_today(map: &ActivityMap) -> Self {
        let (row, column) = map.grid.position(map.today()).unwrap_or((0, 0));
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Status text, dropped once it is a few seconds old.
    pub fn current_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed().as_secs() < 4)
            .map(|(msg, _)| msg.as_str())
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            show_help: false,
            show_day_modal: false,
            status_message: None,
            last_refresh: None,
        }
    }
}
