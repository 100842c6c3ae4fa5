use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::activity::ActivityMap;

use super::layout::cell_at;
use super::state::TuiState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Refresh,
}

/// Handle a key press against the current map.
pub fn handle_key_event(key_event: KeyEvent, state: &mut TuiState, map: &ActivityMap) -> Action {
    if key_event.kind != KeyEventKind::Press {
        return Action::None;
    }

    if state.show_help {
        if matches!(
            key_event.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
        ) {
            state.show_help = false;
        }
        return Action::None;
    }

    if state.show_day_modal {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            state.show_day_modal = false;
        }
        return Action::None;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Char('r') => {
            if should_throttle_refresh(state) {
                return Action::None;
            }
            return Action::Refresh;
        }
        KeyCode::Enter => {
            if map.grid.cell(state.row, state.column).date().is_some() {
                state.show_day_modal = true;
            }
        }
        KeyCode::Left | KeyCode::Char('h') => move_to(state, map, state.row as isize, state.column as isize - 1),
        KeyCode::Right | KeyCode::Char('l') => move_to(state, map, state.row as isize, state.column as isize + 1),
        KeyCode::Up | KeyCode::Char('k') => move_to(state, map, state.row as isize - 1, state.column as isize),
        KeyCode::Down | KeyCode::Char('j') => move_to(state, map, state.row as isize + 1, state.column as isize),
        KeyCode::Home | KeyCode::Char('g') => move_to(state, map, state.row as isize, 0),
        KeyCode::End | KeyCode::Char('G') => {
            if let Some((row, column)) = map.grid.position(map.today()) {
                state.row = row;
                state.column = column;
            }
        }
        _ => {}
    }

    Action::None
}

/// Left click selects a cell; a second click on the same cell opens its breakdown.
pub fn handle_mouse_event(mouse_event: MouseEvent, state: &mut TuiState, map: &ActivityMap, calendar: Rect) {
    if state.show_help || state.show_day_modal {
        if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
            state.show_day_modal = false;
        }
        return;
    }

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((row, column)) = cell_at(calendar, mouse_event.column, mouse_event.row) {
                if map.grid.cell(row, column).date().is_none() {
                    return;
                }
                if (row, column) == (state.row, state.column) {
                    state.show_day_modal = true;
                } else {
                    state.row = row;
                    state.column = column;
                }
            }
        }
        MouseEventKind::ScrollUp => move_to(state, map, state.row as isize, state.column as isize - 1),
        MouseEventKind::ScrollDown => move_to(state, map, state.row as isize, state.column as isize + 1),
        _ => {}
    }
}

/// Move the cursor unless the target has no day behind it.
fn move_to(state: &mut TuiState, map: &ActivityMap, row: isize, column: isize) {
    if row < 0 || column < 0 {
        return;
    }
    let (row, column) = (row as usize, column as usize);
    if map.grid.cell(row, column).date().is_some() {
        state.row = row;
        state.column = column;
    }
}

/// Throttle rapid refresh requests; each one re-reads every repository.
fn should_throttle_refresh(state: &mut TuiState) -> bool {
    let now = std::time::Instant::now();
    if let Some(t) = state.last_refresh {
        if now.duration_since(t).as_millis() < 1000 {
            return true;
        }
    }
    state.last_refresh = Some(now);
    false
}
