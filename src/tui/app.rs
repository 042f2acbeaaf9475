//! Application state for the TUI.

use crate::features::tasks::{Task, TaskList};
use crate::features::timer::{Completion, Engine, Mode, Restored, TimerView};

/// Application state.
pub struct App {
    /// The timer being driven.
    engine: Engine,
    /// Tasks, loaded once at startup.
    tasks: TaskList,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance around `engine`.
    #[must_use]
    pub fn new(mut engine: Engine) -> Self {
        let tasks = TaskList::load(engine.store_mut());
        let status = match engine.restored() {
            Restored::Completed(completion) => Some(completion_message(&completion)),
            Restored::Resumed => Some("Resumed running timer".to_string()),
            Restored::ColdStart | Restored::Resting => Some("Press space to start".to_string()),
        };

        Self {
            engine,
            tasks,
            status,
            should_quit: false,
        }
    }

    /// Current timer view.
    #[must_use]
    pub fn view(&self) -> TimerView {
        self.engine.view()
    }

    /// The task being focused on, if any.
    #[must_use]
    pub fn active_task(&self) -> Option<&Task> {
        self.tasks.active()
    }

    /// Apply elapsed seconds.
    pub fn on_tick(&mut self) {
        if let Some(completion) = self.engine.pump() {
            self.status = Some(completion_message(&completion));
        }
    }

    /// Start or pause.
    pub fn toggle(&mut self) {
        self.engine.start();
        self.status = Some(if self.engine.is_running() { "Started" } else { "Paused" }.to_string());
    }

    /// Restart the current interval.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.status = Some("Reset".to_string());
    }

    /// Stop and switch to `mode`.
    pub fn select_mode(&mut self, mode: Mode) {
        self.engine.select_mode(mode);
        self.status = Some(format!("Switched to {}", mode.label()));
    }

    /// Mark the app for exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn completion_message(completion: &Completion) -> String {
    let (title, body) = completion.notification();
    format!("{title}. {body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, ManualTicker};
    use crate::features::alerts::Silent;
    use crate::features::timer::Peripherals;
    use crate::storage::MemoryStore;
    use chrono::{Local, TimeZone};

    fn app_with(store: &MemoryStore, ticker: &ManualTicker) -> App {
        let engine = Engine::new(
            Box::new(store.clone()),
            Peripherals {
                clock: Box::new(ManualClock::new(
                    Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
                )),
                ticker: Box::new(ticker.clone()),
                notifier: Box::new(Silent),
                sound: Box::new(Silent),
            },
        );
        App::new(engine)
    }

    #[test]
    fn test_toggle_and_tick() {
        let ticker = ManualTicker::new();
        let mut app = app_with(&MemoryStore::new(), &ticker);

        app.toggle();
        assert!(app.view().is_running);
        assert_eq!(app.status.as_deref(), Some("Started"));

        ticker.advance(10);
        app.on_tick();
        assert_eq!(app.view().display, "24:50");

        app.toggle();
        assert!(!app.view().is_running);
    }

    #[test]
    fn test_completion_sets_status() {
        let ticker = ManualTicker::new();
        let mut app = app_with(&MemoryStore::new(), &ticker);

        app.toggle();
        ticker.advance(1500);
        app.on_tick();

        assert_eq!(app.view().mode, Mode::ShortBreak);
        assert_eq!(
            app.status.as_deref(),
            Some("Work session complete. Time for a short break.")
        );
    }

    #[test]
    fn test_select_mode_and_reset() {
        let ticker = ManualTicker::new();
        let mut app = app_with(&MemoryStore::new(), &ticker);

        app.select_mode(Mode::LongBreak);
        app.toggle();
        ticker.advance(30);
        app.on_tick();
        app.reset();

        let view = app.view();
        assert_eq!(view.mode, Mode::LongBreak);
        assert_eq!(view.time_remaining, 900);
        assert!(!view.is_running);
    }

    #[test]
    fn test_loads_active_task() {
        let mut store = MemoryStore::new();
        let mut tasks = TaskList::default();
        tasks.add("write report").unwrap();
        tasks.set_active(1).unwrap();
        tasks.save(&mut store).unwrap();

        let app = app_with(&store, &ManualTicker::new());
        assert_eq!(app.active_task().map(|t| t.text.as_str()), Some("write report"));
    }
}
