//! Terminal User Interface (TUI) for tomato.
//!
//! A full-screen timer built with ratatui and crossterm. Input is polled
//! every 100 ms and the engine is pumped after each poll, so the display
//! keeps up with the countdown without drifting.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::TomatoError;
use crate::features::timer::Engine;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(engine: Engine) -> Result<(), TomatoError> {
    // Setup terminal
    enable_raw_mode().map_err(|e| TomatoError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| TomatoError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| TomatoError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(engine);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), TomatoError> {
    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| TomatoError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events()? {
            match action {
                event::Action::Quit => app.quit(),
                event::Action::Toggle => app.toggle(),
                event::Action::Reset => app.reset(),
                event::Action::Select(mode) => app.select_mode(mode),
            }
        }

        app.on_tick();
    }

    Ok(())
}
