use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::debug;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use chrono::NaiveDate;

use crate::activity::ActivityMap;

use super::events::{handle_key_event, handle_mouse_event, Action};
use super::layout::main_layout;
use super::state::TuiState;
use super::views::{draw_calendar, draw_day_modal, draw_details, draw_header, draw_help_overlay};

/// Run the interactive calendar until the user quits. `refresh` rebuilds the map on demand.
pub fn run<F>(map: ActivityMap, refresh: F) -> io::Result<()>
where
    F: FnMut() -> ActivityMap,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, map, refresh);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B, F>(terminal: &mut Terminal<B>, mut map: ActivityMap, mut refresh: F) -> io::Result<()>
where
    B: ratatui::backend::Backend,
    F: FnMut() -> ActivityMap,
{
    let mut state = TuiState::focused_on_today(&map);
    let mut calendar_area = Rect::default();
    terminal.clear()?;

    loop {
        terminal.draw(|f| {
            let size = f.size();
            let layout = main_layout(size);
            calendar_area = layout.calendar;

            draw_header(f, layout.header, &map, &state);
            draw_calendar(f, layout.calendar, &map, &state);
            draw_details(f, layout.details, &map, &state);

            if state.show_day_modal {
                draw_day_modal(f, size, &map, &state);
            }
            if state.show_help {
                draw_help_overlay(f, size);
            }
        })?;

        if !poll(Duration::from_millis(200))? {
            continue;
        }

        match read()? {
            Event::Key(key_event) => match handle_key_event(key_event, &mut state, &map) {
                Action::Quit => break,
                Action::Refresh => {
                    debug!("rescanning {}", map.root.display());
                    let selected = map.grid.cell(state.row, state.column).date();
                    map = refresh();
                    reselect(&mut state, selected, &map);
                    state.set_status(format!(
                        "Rescanned: {} commits in window",
                        map.commits_in_window()
                    ));
                }
                Action::None => {}
            },
            Event::Mouse(mouse_event) => {
                handle_mouse_event(mouse_event, &mut state, &map, calendar_area)
            }
            _ => {}
        }
    }

    terminal.clear()?;
    Ok(())
}

/// Put the cursor back on `selected` after a rebuild. The window moves when the date
/// rolls over, so the same day can sit in another column; fall back to today.
fn reselect(state: &mut TuiState, selected: Option<NaiveDate>, map: &ActivityMap) {
    let position = selected
        .and_then(|date| map.grid.position(date))
        .or_else(|| map.grid.position(map.today()));
    if let Some((row, column)) = position {
        state.row = row;
        state.column = column;
    }
}
