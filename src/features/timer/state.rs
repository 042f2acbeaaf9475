//! Mutable interval state.

use serde::{Deserialize, Serialize};

use super::format::format_mmss;
use super::mode::Mode;

/// State of the current interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current mode
    pub current_mode: Mode,
    /// Length of the current interval in seconds
    pub total_duration: u32,
    /// Seconds left; never exceeds `total_duration`
    pub time_remaining: u32,
    /// Whether the countdown is running
    pub is_running: bool,
}

impl TimerState {
    /// A stopped interval of `total_duration` seconds in `mode`.
    #[must_use]
    pub const fn new(mode: Mode, total_duration: u32) -> Self {
        Self {
            current_mode: mode,
            total_duration,
            time_remaining: total_duration,
            is_running: false,
        }
    }

    /// Fraction of the interval still remaining (1.0 at start, 0.0 at end).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_duration == 0 {
            return 0.0;
        }
        f64::from(self.time_remaining) / f64::from(self.total_duration)
    }

    /// Seconds elapsed in this interval.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.total_duration.saturating_sub(self.time_remaining)
    }

    /// Remaining time as MM:SS.
    #[must_use]
    pub fn display(&self) -> String {
        format_mmss(self.time_remaining)
    }
}
