//! Timer command implementations.
//!
//! Each invocation is one engine lifetime: a running interval is restored
//! from its snapshot when the command starts and keeps running after it
//! exits.

use std::io::{self, Write};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::error::TomatoError;
use crate::features::tasks::TaskList;
use crate::features::timer::{Completion, Engine, Mode};
use crate::output::{format_completion, format_view, format_view_line};

/// How often the foreground loops poll the tick source.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Execute start command (toggles start and pause)
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn start(engine: &mut Engine, format: OutputFormat) -> Result<String, TomatoError> {
    engine.start();
    show(engine, format)
}

/// Execute pause command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn pause(engine: &mut Engine, format: OutputFormat) -> Result<String, TomatoError> {
    engine.pause();
    show(engine, format)
}

/// Execute reset command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn reset(engine: &mut Engine, format: OutputFormat) -> Result<String, TomatoError> {
    engine.reset();
    show(engine, format)
}

/// Execute switch command
///
/// # Errors
///
/// Returns an error if the mode name is unknown or output formatting fails.
pub fn switch(engine: &mut Engine, mode: &str, format: OutputFormat) -> Result<String, TomatoError> {
    let mode = Mode::from_str(mode)?;
    engine.select_mode(mode);
    show(engine, format)
}

/// Execute status command
///
/// With `watch`, follows a running interval until it completes.
///
/// # Errors
///
/// Returns an error if writing to the terminal or output formatting fails.
pub fn status(engine: &mut Engine, watch: bool, format: OutputFormat) -> Result<String, TomatoError> {
    if !watch || !engine.is_running() {
        return show(engine, format);
    }

    let completion = follow(engine, format)?;
    format_completion(&completion, format)
}

/// Execute run command
///
/// Starts the timer if it is stopped, then follows it. With `continuous`,
/// each completion starts the next interval and this never returns on its
/// own.
///
/// # Errors
///
/// Returns an error if writing to the terminal or output formatting fails.
pub fn run(engine: &mut Engine, continuous: bool, format: OutputFormat) -> Result<String, TomatoError> {
    loop {
        if !engine.is_running() {
            engine.start();
        }

        let completion = follow(engine, format)?;
        let report = format_completion(&completion, format)?;
        if !continuous {
            return Ok(report);
        }

        println!("{report}");
        debug!(next = completion.next.as_str(), "starting next interval");
    }
}

/// Render the current view with the active task.
fn show(engine: &mut Engine, format: OutputFormat) -> Result<String, TomatoError> {
    let tasks = TaskList::load(engine.store_mut());
    format_view(&engine.view(), tasks.active(), format)
}

/// Pump the engine until the running interval completes, redrawing as
/// seconds pass.
///
/// Pretty output redraws a single line in place; JSON output emits one
/// compact view per second.
fn follow(engine: &mut Engine, format: OutputFormat) -> Result<Completion, TomatoError> {
    let mut stdout = io::stdout();
    let mut last_drawn = None;

    loop {
        if let Some(completion) = engine.pump() {
            if format == OutputFormat::Pretty {
                write!(stdout, "\r\x1b[K")?;
                stdout.flush()?;
            }
            return Ok(completion);
        }

        let view = engine.view();
        if last_drawn != Some(view.time_remaining) {
            last_drawn = Some(view.time_remaining);
            match format {
                OutputFormat::Pretty => write!(stdout, "\r{}\x1b[K", format_view_line(&view))?,
                OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string(&view)?)?,
            }
            stdout.flush()?;
        }

        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, ManualTicker};
    use crate::features::alerts::Silent;
    use crate::features::timer::Peripherals;
    use crate::storage::MemoryStore;
    use chrono::{Local, TimeZone};

    fn engine(store: &MemoryStore) -> Engine {
        Engine::new(
            Box::new(store.clone()),
            Peripherals {
                clock: Box::new(ManualClock::new(
                    Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
                )),
                ticker: Box::new(ManualTicker::new()),
                notifier: Box::new(Silent),
                sound: Box::new(Silent),
            },
        )
    }

    fn json(output: &str) -> serde_json::Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_start_toggles() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);

        let started = json(&start(&mut engine, OutputFormat::Json).unwrap());
        assert_eq!(started["timer"]["is_running"], true);

        let paused = json(&start(&mut engine, OutputFormat::Json).unwrap());
        assert_eq!(paused["timer"]["is_running"], false);
    }

    #[test]
    fn test_switch_stops_and_switches() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        engine.start();

        let output = json(&switch(&mut engine, "long", OutputFormat::Json).unwrap());
        assert_eq!(output["timer"]["mode"], "longBreak");
        assert_eq!(output["timer"]["time_remaining"], 900);
        assert_eq!(output["timer"]["is_running"], false);
    }

    #[test]
    fn test_switch_unknown_mode() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);

        let err = switch(&mut engine, "nap", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, TomatoError::InvalidMode(_)));
    }

    #[test]
    fn test_status_shows_active_task() {
        let mut store = MemoryStore::new();
        let mut tasks = TaskList::default();
        tasks.add("write report").unwrap();
        tasks.set_active(1).unwrap();
        tasks.save(&mut store).unwrap();

        let mut engine = engine(&store);
        let output = json(&status(&mut engine, false, OutputFormat::Json).unwrap());
        assert_eq!(output["active_task"]["text"], "write report");
    }

    #[test]
    fn test_watch_on_stopped_timer_returns_view() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);

        let output = json(&status(&mut engine, true, OutputFormat::Json).unwrap());
        assert_eq!(output["timer"]["is_running"], false);
    }
}
