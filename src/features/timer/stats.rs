//! Daily session statistics.
//!
//! Counters are persisted as integer strings together with the calendar
//! day they belong to. The first process start on a new day zeroes them.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::TomatoError;
use crate::storage::{keys, KeyValueStore};

/// Work sessions per long break.
pub const LONG_BREAK_INTERVAL: u32 = 4;

/// Completed-session counters for the current day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Completed work intervals
    pub sessions: u32,
    /// Minutes credited for completed work intervals
    pub total_focus_minutes: u32,
    /// Calendar day the counters belong to (`YYYY-MM-DD`)
    pub last_active_date: Option<String>,
}

/// Minutes credited for a work interval of `secs` seconds, rounded to the
/// nearest minute.
#[must_use]
pub const fn focus_credit_minutes(secs: u32) -> u32 {
    (secs + 30) / 60
}

impl Statistics {
    /// Load counters from the store. Unreadable values count as zero.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let last_active_date = match store.get(keys::LAST_ACTIVE_DATE) {
            Ok(date) => date,
            Err(e) => {
                warn!(error = %e, "failed to read last active date");
                None
            }
        };

        Self {
            sessions: load_counter(store, keys::SESSIONS),
            total_focus_minutes: load_counter(store, keys::TOTAL_FOCUS_MINUTES),
            last_active_date,
        }
    }

    /// Persist both counters.
    ///
    /// # Errors
    ///
    /// Returns an error if a store write fails.
    pub fn save_counters(&self, store: &mut dyn KeyValueStore) -> Result<(), TomatoError> {
        store.set(keys::SESSIONS, &self.sessions.to_string())?;
        store.set(keys::TOTAL_FOCUS_MINUTES, &self.total_focus_minutes.to_string())
    }

    /// Zero the counters if `today` differs from the stored day.
    ///
    /// Returns true if a reset happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset values cannot be persisted. The
    /// in-memory counters are reset regardless.
    pub fn roll_over(&mut self, store: &mut dyn KeyValueStore, today: &str) -> Result<bool, TomatoError> {
        if self.last_active_date.as_deref() == Some(today) {
            return Ok(false);
        }

        info!(
            previous = self.last_active_date.as_deref().unwrap_or("never"),
            today, "new day, resetting session statistics"
        );
        self.sessions = 0;
        self.total_focus_minutes = 0;
        self.last_active_date = Some(today.to_string());

        self.save_counters(store)?;
        store.set(keys::LAST_ACTIVE_DATE, today)?;
        Ok(true)
    }

    /// Credit one completed work interval of `work_secs` seconds.
    ///
    /// Returns the minutes credited.
    pub fn record_work_session(&mut self, work_secs: u32) -> u32 {
        let credit = focus_credit_minutes(work_secs);
        self.sessions = self.sessions.saturating_add(1);
        self.total_focus_minutes = self.total_focus_minutes.saturating_add(credit);
        credit
    }

    /// Whether the next break should be a long one.
    #[must_use]
    pub const fn long_break_due(&self) -> bool {
        self.sessions > 0 && self.sessions % LONG_BREAK_INTERVAL == 0
    }
}

fn load_counter(store: &dyn KeyValueStore, key: &str) -> u32 {
    match store.get(key) {
        Ok(None) => 0,
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "ignoring corrupted counter");
            0
        }),
        Err(e) => {
            warn!(key, error = %e, "failed to read counter");
            0
        }
    }
}
