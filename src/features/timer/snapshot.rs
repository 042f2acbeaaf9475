//! Persisted timer state that survives a restart.
//!
//! Two records exist, never both at once:
//! - [`Snapshot`]: written when an interval starts running. It records when
//!   the interval will expire, so the next process can either resume the
//!   countdown or complete the interval it missed.
//! - [`Position`]: written whenever the timer is left idle or paused, so
//!   the next process starts from the same mode and remaining time.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use super::mode::Mode;
use super::state::TimerState;
use crate::error::TomatoError;
use crate::storage::{keys, KeyValueStore};

/// A running interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Wall-clock instant the interval expires, in epoch milliseconds
    pub end_timestamp: i64,
    /// Mode of the interval
    pub mode: Mode,
    /// Length of the interval in seconds
    pub total_duration: u32,
}

impl Snapshot {
    /// Snapshot of `state` started at `now_ms`.
    #[must_use]
    pub fn starting_at(now_ms: i64, state: &TimerState) -> Self {
        Self {
            end_timestamp: now_ms + i64::from(state.time_remaining) * 1000,
            mode: state.current_mode,
            total_duration: state.total_duration,
        }
    }

    /// Whole seconds left at `now_ms`, or `None` once less than a second
    /// remains. A running interval never resumes at zero.
    #[must_use]
    pub fn remaining_secs(&self, now_ms: i64) -> Option<u32> {
        let secs = self.end_timestamp.saturating_sub(now_ms) / 1000;
        if secs <= 0 {
            return None;
        }
        Some(u32::try_from(secs).map_or(self.total_duration, |s| s.min(self.total_duration)))
    }

    /// Load the snapshot, deleting it if it is corrupted.
    pub fn load(store: &mut dyn KeyValueStore) -> Option<Self> {
        let snapshot = load_record::<Self>(store, keys::TIMER_STATE)?;
        if snapshot.total_duration == 0 {
            warn!("discarding timer snapshot with zero duration");
            discard(store, keys::TIMER_STATE);
            return None;
        }
        Some(snapshot)
    }

    /// Persist the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), TomatoError> {
        store.set(keys::TIMER_STATE, &serde_json::to_string(self)?)
    }

    /// Delete any persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear(store: &mut dyn KeyValueStore) -> Result<(), TomatoError> {
        store.remove(keys::TIMER_STATE)
    }
}

/// An idle or paused interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Mode of the interval
    pub mode: Mode,
    /// Length of the interval in seconds
    pub total_duration: u32,
    /// Seconds left
    pub time_remaining: u32,
}

impl Position {
    /// Position of `state`.
    #[must_use]
    pub const fn of(state: &TimerState) -> Self {
        Self {
            mode: state.current_mode,
            total_duration: state.total_duration,
            time_remaining: state.time_remaining,
        }
    }

    /// The stopped timer state this position describes.
    #[must_use]
    pub const fn to_state(self) -> TimerState {
        TimerState {
            current_mode: self.mode,
            total_duration: self.total_duration,
            time_remaining: self.time_remaining,
            is_running: false,
        }
    }

    /// Load the position, deleting it if it is corrupted or inconsistent.
    pub fn load(store: &mut dyn KeyValueStore) -> Option<Self> {
        let position = load_record::<Self>(store, keys::TIMER_POSITION)?;
        let valid = position.total_duration > 0
            && position.time_remaining > 0
            && position.time_remaining <= position.total_duration;
        if !valid {
            warn!(?position, "discarding inconsistent timer position");
            discard(store, keys::TIMER_POSITION);
            return None;
        }
        Some(position)
    }

    /// Persist the position.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), TomatoError> {
        store.set(keys::TIMER_POSITION, &serde_json::to_string(self)?)
    }

    /// Delete any persisted position.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear(store: &mut dyn KeyValueStore) -> Result<(), TomatoError> {
        store.remove(keys::TIMER_POSITION)
    }
}

fn load_record<T: DeserializeOwned>(store: &mut dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key, error = %e, "failed to read timer state");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(key, error = %e, "discarding corrupted timer state");
            discard(store, key);
            None
        }
    }
}

fn discard(store: &mut dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        warn!(key, error = %e, "failed to delete timer state");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_snapshot_starting_at() {
        let mut state = TimerState::new(Mode::Work, 1500);
        state.time_remaining = 600;

        let snapshot = Snapshot::starting_at(1_000_000, &state);
        assert_eq!(snapshot.end_timestamp, 1_600_000);
        assert_eq!(snapshot.mode, Mode::Work);
        assert_eq!(snapshot.total_duration, 1500);
    }

    #[test]
    fn test_snapshot_remaining_secs() {
        let snapshot = Snapshot {
            end_timestamp: 10_000,
            mode: Mode::ShortBreak,
            total_duration: 300,
        };

        assert_eq!(snapshot.remaining_secs(0), Some(10));
        assert_eq!(snapshot.remaining_secs(500), Some(9));
        assert_eq!(snapshot.remaining_secs(9_000), Some(1));
        assert_eq!(snapshot.remaining_secs(9_001), None);
        assert_eq!(snapshot.remaining_secs(9_999), None);
        assert_eq!(snapshot.remaining_secs(10_000), None);
        assert_eq!(snapshot.remaining_secs(20_000), None);
    }

    #[test]
    fn test_snapshot_remaining_never_exceeds_total() {
        let snapshot = Snapshot {
            end_timestamp: 1_000_000,
            mode: Mode::ShortBreak,
            total_duration: 300,
        };
        assert_eq!(snapshot.remaining_secs(0), Some(300));
    }

    #[test]
    fn test_snapshot_wire_format() {
        let mut store = MemoryStore::new();
        let snapshot = Snapshot {
            end_timestamp: 1_700_000_000_000,
            mode: Mode::LongBreak,
            total_duration: 900,
        };
        snapshot.save(&mut store).unwrap();

        assert_eq!(
            store.get(keys::TIMER_STATE).unwrap().unwrap(),
            r#"{"endTimestamp":1700000000000,"mode":"longBreak","totalDuration":900}"#
        );
        assert_eq!(Snapshot::load(&mut store), Some(snapshot));

        Snapshot::clear(&mut store).unwrap();
        assert_eq!(Snapshot::load(&mut store), None);
    }

    #[test]
    fn test_corrupted_snapshot_is_deleted() {
        let mut store = MemoryStore::new();
        store.set(keys::TIMER_STATE, "{\"endTimestamp\": \"soon\"").unwrap();

        assert_eq!(Snapshot::load(&mut store), None);
        assert_eq!(store.get(keys::TIMER_STATE).unwrap(), None);
    }

    #[test]
    fn test_snapshot_unknown_mode_is_deleted() {
        let mut store = MemoryStore::new();
        store
            .set(
                keys::TIMER_STATE,
                r#"{"endTimestamp":1,"mode":"nap","totalDuration":60}"#,
            )
            .unwrap();

        assert_eq!(Snapshot::load(&mut store), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_position_round_trip() {
        let mut store = MemoryStore::new();
        let mut state = TimerState::new(Mode::ShortBreak, 300);
        state.time_remaining = 120;

        Position::of(&state).save(&mut store).unwrap();
        let loaded = Position::load(&mut store).unwrap();

        assert_eq!(loaded.to_state(), state);
    }

    #[test]
    fn test_inconsistent_position_is_deleted() {
        let mut store = MemoryStore::new();
        store
            .set(
                keys::TIMER_POSITION,
                r#"{"mode":"work","totalDuration":60,"timeRemaining":90}"#,
            )
            .unwrap();

        assert_eq!(Position::load(&mut store), None);
        assert!(store.is_empty());
    }
}
