//! Capability traits at the timer engine's seams.
//!
//! The engine never touches the wall clock, the scheduler, the desktop, or
//! the speaker directly. Front ends inject real implementations; tests
//! inject manual or mocked ones and advance time deterministically.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::TomatoError;

/// Source of the current wall-clock time.
pub trait Clock {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;

    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Current calendar day in the local time zone, as `YYYY-MM-DD`.
    fn today(&self) -> String {
        self.now().date_naive().format("%Y-%m-%d").to_string()
    }
}

/// A repeating one-second tick that can be started and stopped.
///
/// At most one tick stream is outstanding: `start` on an active source
/// restarts it rather than adding a second stream.
pub trait TickSource {
    /// Begin delivering ticks, one per elapsed real second.
    fn start(&mut self);

    /// Stop delivering ticks and drop any that are pending.
    fn stop(&mut self);

    /// Whether ticks are currently being delivered.
    fn is_active(&self) -> bool;

    /// Number of whole seconds elapsed since the previous poll (or since
    /// `start`). Always 0 while stopped.
    fn poll(&mut self) -> u32;
}

/// Notification permission, owned by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Not yet decided.
    Default,
    /// Notifications may be shown.
    Granted,
    /// Notifications must not be shown.
    Denied,
}

/// Best-effort desktop notification dispatcher.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Current permission state.
    fn permission(&self) -> Permission;

    /// Ask the environment for permission. Fire-and-forget.
    fn request_permission(&mut self);

    /// Show a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn notify(&self, title: &str, body: &str) -> Result<(), TomatoError>;
}

/// Best-effort completion chime.
#[cfg_attr(test, mockall::automock)]
pub trait SoundPlayer {
    /// Play the completion chime.
    ///
    /// # Errors
    ///
    /// Returns an error if the sound could not be played.
    fn play_chime(&self) -> Result<(), TomatoError>;
}
