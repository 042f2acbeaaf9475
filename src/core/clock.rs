//! Wall-clock implementations.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Local};

use super::traits::Clock;

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Local>>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advance() {
        let start = Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let shared = clock.clone();

        clock.advance(Duration::seconds(90));
        assert_eq!(shared.now(), start + Duration::seconds(90));
        assert_eq!(shared.now_millis(), start.timestamp_millis() + 90_000);
    }

    #[test]
    fn test_today_format() {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 3, 5, 23, 59, 0).unwrap());
        assert_eq!(clock.today(), "2024-03-05");

        clock.advance(Duration::minutes(2));
        assert_eq!(clock.today(), "2024-03-06");
    }
}
