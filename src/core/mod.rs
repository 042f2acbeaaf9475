//! Core abstractions for tomato.
//!
//! This module provides the capability traits the timer engine is driven
//! through, and the real and manual implementations of clock and ticks.

mod clock;
mod ticker;
mod traits;

pub use clock::{ManualClock, SystemClock};
pub use ticker::{IntervalTicker, ManualTicker};
pub use traits::{Clock, Notifier, Permission, SoundPlayer, TickSource};

#[cfg(test)]
pub use traits::{MockNotifier, MockSoundPlayer};
