//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::TomatoError;
use crate::features::timer::Mode;

/// How long to wait for input before the next timer poll.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the timer.
    Toggle,
    /// Reset the current interval.
    Reset,
    /// Switch to a mode.
    Select(Mode),
}

/// Wait briefly for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events() -> Result<Option<Action>, TomatoError> {
    if !event::poll(POLL_TIMEOUT).map_err(|e| TomatoError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| TomatoError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(action_for(key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action.
#[must_use]
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('1') => Some(Action::Select(Mode::Work)),
        KeyCode::Char('2') => Some(Action::Select(Mode::ShortBreak)),
        KeyCode::Char('3') => Some(Action::Select(Mode::LongBreak)),
        _ => None,
    }
}
