//! The timer/session engine.
//!
//! Owns the current interval, the daily counters, and the duration
//! settings. Every operation runs to completion before the next one, so the
//! engine needs no locking; time only enters through the injected
//! [`TickSource`] and [`Clock`].
//!
//! Persistence failures, notification failures and sound failures are
//! logged and otherwise ignored: the countdown keeps working without them.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::mode::Mode;
use super::settings::DurationSettings;
use super::snapshot::{Position, Snapshot};
use super::state::TimerState;
use super::stats::Statistics;
use crate::core::{Clock, Notifier, Permission, SoundPlayer, TickSource};
use crate::storage::KeyValueStore;

/// The capabilities an engine is driven through.
pub struct Peripherals {
    /// Wall clock
    pub clock: Box<dyn Clock>,
    /// One-second tick source
    pub ticker: Box<dyn TickSource>,
    /// Desktop notifications
    pub notifier: Box<dyn Notifier>,
    /// Completion chime
    pub sound: Box<dyn SoundPlayer>,
}

/// What happened when an interval ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Mode of the interval that finished
    pub finished: Mode,
    /// Mode switched to
    pub next: Mode,
    /// Work sessions completed today, after this completion
    pub sessions: u32,
}

impl Completion {
    /// Notification title and body for this completion.
    #[must_use]
    pub const fn notification(&self) -> (&'static str, &'static str) {
        match (self.finished, self.next) {
            (Mode::Work, Mode::LongBreak) => ("Work session complete", "Time for a long break."),
            (Mode::Work, _) => ("Work session complete", "Time for a short break."),
            _ => ("Break over", "Time to focus."),
        }
    }
}

/// How the timer was restored at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Restored {
    /// Nothing persisted; a fresh work interval
    ColdStart,
    /// An idle or paused interval
    Resting,
    /// A running interval, still counting down
    Resumed,
    /// A running interval that expired while no process was running
    Completed(Completion),
}

/// Read model for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    /// Current mode
    pub mode: Mode,
    /// Display name of the mode
    pub mode_label: &'static str,
    /// Remaining time as MM:SS
    pub display: String,
    /// Seconds left
    pub time_remaining: u32,
    /// Interval length in seconds
    pub total_duration: u32,
    /// `time_remaining / total_duration`
    pub progress: f64,
    /// Whether the countdown is running
    pub is_running: bool,
    /// Work sessions completed today
    pub sessions: u32,
    /// Focus minutes credited today
    pub total_focus_minutes: u32,
}

/// The timer/session engine.
pub struct Engine {
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ticker: Box<dyn TickSource>,
    notifier: Box<dyn Notifier>,
    sound: Box<dyn SoundPlayer>,
    settings: DurationSettings,
    state: TimerState,
    stats: Statistics,
    restored: Restored,
}

impl Engine {
    /// Create an engine over `store`.
    ///
    /// Loads the duration settings, zeroes the counters if this is the first
    /// start on a new calendar day, then restores the persisted interval.
    /// An interval that expired while no process was running is completed
    /// here, exactly once.
    #[must_use]
    pub fn new(mut store: Box<dyn KeyValueStore>, peripherals: Peripherals) -> Self {
        let Peripherals {
            clock,
            ticker,
            notifier,
            sound,
        } = peripherals;

        let settings = DurationSettings::load(store.as_mut());
        let mut stats = Statistics::load(store.as_ref());
        if let Err(e) = stats.roll_over(store.as_mut(), &clock.today()) {
            warn!(error = %e, "failed to persist daily statistics reset");
        }

        let mut engine = Self {
            store,
            clock,
            ticker,
            notifier,
            sound,
            state: TimerState::new(Mode::Work, settings.duration_secs(Mode::Work)),
            settings,
            stats,
            restored: Restored::ColdStart,
        };
        engine.restored = engine.restore_timer_state();
        engine
    }

    /// Current interval state.
    #[must_use]
    pub const fn state(&self) -> &TimerState {
        &self.state
    }

    /// Current duration settings.
    #[must_use]
    pub const fn settings(&self) -> &DurationSettings {
        &self.settings
    }

    /// Today's counters.
    #[must_use]
    pub const fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// How the timer was restored when this engine was created.
    #[must_use]
    pub const fn restored(&self) -> Restored {
        self.restored
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// The shared store, for collaborators such as the task list.
    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }

    /// Snapshot of everything a renderer shows.
    #[must_use]
    pub fn view(&self) -> TimerView {
        TimerView {
            mode: self.state.current_mode,
            mode_label: self.state.current_mode.label(),
            display: self.state.display(),
            time_remaining: self.state.time_remaining,
            total_duration: self.state.total_duration,
            progress: self.state.progress(),
            is_running: self.state.is_running,
            sessions: self.stats.sessions,
            total_focus_minutes: self.stats.total_focus_minutes,
        }
    }

    /// Start the countdown, or pause it if it is already running.
    pub fn start(&mut self) {
        if self.state.is_running {
            self.pause();
            return;
        }

        self.state.is_running = true;
        self.ticker.start();
        self.save_timer_state();
        self.clear_position();
        debug!(
            mode = self.state.current_mode.as_str(),
            remaining = self.state.time_remaining,
            "timer started"
        );

        if self.notifier.permission() == Permission::Default {
            self.notifier.request_permission();
        }
    }

    /// Stop the countdown, keeping the remaining time.
    pub fn pause(&mut self) {
        self.halt();
        self.save_position();
    }

    /// Stop the countdown and restart the current interval.
    pub fn reset(&mut self) {
        self.halt();
        self.state.time_remaining = self.state.total_duration;
        self.save_position();
    }

    /// Advance the countdown by one second.
    ///
    /// Completes the interval when the remaining time reaches zero.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.state.is_running {
            return None;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining == 0 {
            Some(self.complete_session())
        } else {
            None
        }
    }

    /// Apply every tick the tick source has due, stopping at a completion.
    ///
    /// Safe to call more often than once a second.
    pub fn pump(&mut self) -> Option<Completion> {
        let due = self.ticker.poll();
        for _ in 0..due {
            if !self.state.is_running {
                break;
            }
            if let Some(completion) = self.tick() {
                return Some(completion);
            }
        }
        None
    }

    /// Switch to `mode` with a full interval. Does not start or stop the
    /// countdown.
    pub fn switch_mode(&mut self, mode: Mode) {
        let total = self.settings.duration_secs(mode);
        self.state.current_mode = mode;
        self.state.total_duration = total;
        self.state.time_remaining = total;

        if self.state.is_running {
            self.save_timer_state();
        } else {
            self.save_position();
        }
    }

    /// Switch to the mode called `name`.
    ///
    /// Unknown names are logged and ignored. Returns whether the switch
    /// happened.
    pub fn switch_mode_named(&mut self, name: &str) -> bool {
        if let Some(mode) = Mode::parse(name) {
            self.switch_mode(mode);
            true
        } else {
            warn!(mode = name, "ignoring switch to unknown timer mode");
            false
        }
    }

    /// Stop the countdown and switch to `mode`, as a mode button does.
    pub fn select_mode(&mut self, mode: Mode) {
        self.halt();
        self.switch_mode(mode);
    }

    /// Finish the current interval: credit work sessions, pick the next
    /// mode, and alert.
    pub fn complete_session(&mut self) -> Completion {
        self.pause();
        self.play_chime();

        let finished = self.state.current_mode;
        let next = if finished == Mode::Work {
            // Credit the work duration configured now, not at interval start.
            let credited = self
                .stats
                .record_work_session(self.settings.duration_secs(Mode::Work));
            if let Err(e) = self.stats.save_counters(self.store.as_mut()) {
                warn!(error = %e, "failed to persist session statistics");
            }
            info!(
                sessions = self.stats.sessions,
                credited, "work session complete"
            );

            if self.stats.long_break_due() {
                Mode::LongBreak
            } else {
                Mode::ShortBreak
            }
        } else {
            info!(mode = finished.as_str(), "break complete");
            Mode::Work
        };

        self.switch_mode(next);

        let completion = Completion {
            finished,
            next,
            sessions: self.stats.sessions,
        };
        let (title, body) = completion.notification();
        self.send_notification(title, body);
        completion
    }

    /// Replace the duration settings and persist them.
    ///
    /// A stopped timer restarts its current interval at the new length; a
    /// running interval keeps its length.
    pub fn apply_settings(&mut self, settings: DurationSettings) {
        self.settings = settings;
        if let Err(e) = settings.save(self.store.as_mut()) {
            warn!(error = %e, "failed to persist settings");
        }

        if !self.state.is_running {
            self.switch_mode(self.state.current_mode);
        }
    }

    /// Restore the interval persisted by a previous process.
    pub fn restore_timer_state(&mut self) -> Restored {
        let now_ms = self.clock.now_millis();

        if let Some(snapshot) = Snapshot::load(self.store.as_mut()) {
            self.clear_position();
            self.state = TimerState {
                current_mode: snapshot.mode,
                total_duration: snapshot.total_duration,
                time_remaining: 0,
                is_running: false,
            };

            return match snapshot.remaining_secs(now_ms) {
                None => {
                    info!(
                        mode = snapshot.mode.as_str(),
                        "interval expired while stopped, completing it"
                    );
                    self.clear_timer_state();
                    Restored::Completed(self.complete_session())
                }
                Some(remaining) => {
                    info!(
                        mode = snapshot.mode.as_str(),
                        remaining, "resuming running interval"
                    );
                    self.state.time_remaining = remaining;
                    self.state.is_running = true;
                    self.ticker.start();
                    Restored::Resumed
                }
            };
        }

        if let Some(position) = Position::load(self.store.as_mut()) {
            debug!(?position, "restored resting interval");
            self.state = position.to_state();
            return Restored::Resting;
        }

        self.state = TimerState::new(Mode::Work, self.settings.duration_secs(Mode::Work));
        Restored::ColdStart
    }

    /// Persist a snapshot of the running interval.
    pub fn save_timer_state(&mut self) {
        let snapshot = Snapshot::starting_at(self.clock.now_millis(), &self.state);
        if let Err(e) = snapshot.save(self.store.as_mut()) {
            warn!(error = %e, "failed to persist timer snapshot");
        }
    }

    /// Delete the running-interval snapshot.
    pub fn clear_timer_state(&mut self) {
        if let Err(e) = Snapshot::clear(self.store.as_mut()) {
            warn!(error = %e, "failed to clear timer snapshot");
        }
    }

    fn save_position(&mut self) {
        if let Err(e) = Position::of(&self.state).save(self.store.as_mut()) {
            warn!(error = %e, "failed to persist timer position");
        }
    }

    fn clear_position(&mut self) {
        if let Err(e) = Position::clear(self.store.as_mut()) {
            warn!(error = %e, "failed to clear timer position");
        }
    }

    fn halt(&mut self) {
        self.state.is_running = false;
        self.ticker.stop();
        self.clear_timer_state();
    }

    fn play_chime(&self) {
        if let Err(e) = self.sound.play_chime() {
            warn!(error = %e, "failed to play completion chime");
        }
    }

    fn send_notification(&self, title: &str, body: &str) {
        if self.notifier.permission() != Permission::Granted {
            debug!(title, "notification permission not granted, skipping");
            return;
        }
        if let Err(e) = self.notifier.notify(title, body) {
            warn!(error = %e, "failed to show notification");
        }
    }
}
