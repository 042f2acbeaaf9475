//! Tick source implementations.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use super::traits::TickSource;

/// A drift-free 1 Hz tick source backed by the monotonic clock.
///
/// Ticks are counted from the instant `start` was called, so polling late
/// (or more often than once a second) never loses or duplicates a second.
#[derive(Debug, Default)]
pub struct IntervalTicker {
    started: Option<Instant>,
    delivered: u64,
}

impl IntervalTicker {
    /// Create a stopped ticker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: None,
            delivered: 0,
        }
    }
}

impl TickSource for IntervalTicker {
    fn start(&mut self) {
        self.started = Some(Instant::now());
        self.delivered = 0;
    }

    fn stop(&mut self) {
        self.started = None;
        self.delivered = 0;
    }

    fn is_active(&self) -> bool {
        self.started.is_some()
    }

    fn poll(&mut self) -> u32 {
        let Some(started) = self.started else {
            return 0;
        };

        let elapsed = started.elapsed().as_secs();
        let due = elapsed.saturating_sub(self.delivered);
        self.delivered = elapsed;
        u32::try_from(due).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Default)]
struct ManualTickerState {
    active: bool,
    pending: u32,
    starts: usize,
    stops: usize,
}

/// A tick source advanced by hand. Clones share state, so a test can keep
/// one handle after giving the other to an engine.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    state: Rc<RefCell<ManualTickerState>>,
}

impl ManualTicker {
    /// Create a stopped ticker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `seconds` elapse. Ignored while stopped.
    pub fn advance(&self, seconds: u32) {
        let mut state = self.state.borrow_mut();
        if state.active {
            state.pending = state.pending.saturating_add(seconds);
        }
    }

    /// How many times `start` has been called.
    #[must_use]
    pub fn starts(&self) -> usize {
        self.state.borrow().starts
    }

    /// How many times `stop` has been called.
    #[must_use]
    pub fn stops(&self) -> usize {
        self.state.borrow().stops
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self) {
        let mut state = self.state.borrow_mut();
        state.active = true;
        state.pending = 0;
        state.starts += 1;
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.active = false;
        state.pending = 0;
        state.stops += 1;
    }

    fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    fn poll(&mut self) -> u32 {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_ticker_stopped() {
        let mut ticker = IntervalTicker::new();
        assert!(!ticker.is_active());
        assert_eq!(ticker.poll(), 0);
    }

    #[test]
    fn test_interval_ticker_start_stop() {
        let mut ticker = IntervalTicker::new();
        ticker.start();
        assert!(ticker.is_active());
        // Less than a second has passed
        assert_eq!(ticker.poll(), 0);

        ticker.stop();
        assert!(!ticker.is_active());
        assert_eq!(ticker.poll(), 0);
    }

    #[test]
    fn test_manual_ticker() {
        let mut ticker = ManualTicker::new();
        let handle = ticker.clone();

        handle.advance(3);
        assert_eq!(ticker.poll(), 0, "stopped ticker accumulates nothing");

        ticker.start();
        handle.advance(3);
        assert_eq!(ticker.poll(), 3);
        assert_eq!(ticker.poll(), 0);

        handle.advance(2);
        ticker.stop();
        assert_eq!(ticker.poll(), 0, "stop drops pending ticks");
        assert_eq!(handle.starts(), 1);
        assert_eq!(handle.stops(), 1);
    }
}
