//! Pomodoro timer.
//!
//! Provides the interval countdown and its bookkeeping:
//! - Work, short break and long break modes with configurable lengths
//! - Automatic mode advance with a long break after every fourth session
//! - Daily session and focus-minute counters
//! - Restoring a running interval after the process restarts

mod engine;
pub mod format;
mod mode;
pub mod settings;
mod snapshot;
mod state;
pub mod stats;

pub use engine::{Completion, Engine, Peripherals, Restored, TimerView};
pub use format::{format_minutes, format_mmss, render_progress_bar};
pub use mode::Mode;
pub use settings::{DurationSettings, MinuteRange};
pub use snapshot::{Position, Snapshot};
pub use state::TimerState;
pub use stats::{Statistics, LONG_BREAK_INTERVAL};
