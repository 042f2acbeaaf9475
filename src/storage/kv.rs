//! String key-value persistence.
//!
//! Every persisted entry (settings, running snapshot, counters, tasks) is a
//! string value under a fixed key. JSON encoding and validation happen in the
//! feature modules; the store only moves strings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::TomatoError;

/// Keys used in the store.
pub mod keys {
    /// Timer duration settings (JSON object of minutes).
    pub const SETTINGS: &str = "settings";
    /// Snapshot of a running interval (JSON).
    pub const TIMER_STATE: &str = "timerState";
    /// Mode and remaining time of an idle or paused timer (JSON).
    pub const TIMER_POSITION: &str = "timerPosition";
    /// Completed work sessions today (integer string).
    pub const SESSIONS: &str = "sessions";
    /// Focus minutes credited today (integer string).
    pub const TOTAL_FOCUS_MINUTES: &str = "totalFocusMinutes";
    /// Calendar day the counters belong to.
    pub const LAST_ACTIVE_DATE: &str = "lastActiveDate";
    /// Task list (JSON array).
    pub const TASKS: &str = "tasks";
}

/// A string-keyed store of string values.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, TomatoError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), TomatoError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), TomatoError>;
}

/// Key-value store backed by the `kv` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Create a store over an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, TomatoError> {
        self.db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| TomatoError::Storage(format!("Failed to read {key}: {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TomatoError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| TomatoError::Storage(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TomatoError> {
        self.db
            .connection()
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| TomatoError::Storage(format!("Failed to delete {key}: {e}")))?;
        Ok(())
    }
}

/// In-memory store. Clones share the same entries, so a test can hand one
/// clone to an engine and inspect or reload from another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TomatoError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TomatoError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TomatoError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::with_database(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_sqlite_set_and_get() {
        let mut store = create_test_store();

        assert_eq!(store.get(keys::SESSIONS).unwrap(), None);

        store.set(keys::SESSIONS, "3").unwrap();
        assert_eq!(store.get(keys::SESSIONS).unwrap(), Some("3".to_string()));

        store.set(keys::SESSIONS, "4").unwrap();
        assert_eq!(store.get(keys::SESSIONS).unwrap(), Some("4".to_string()));
    }

    #[test]
    fn test_sqlite_remove() {
        let mut store = create_test_store();

        store.set(keys::TIMER_STATE, "{}").unwrap();
        store.remove(keys::TIMER_STATE).unwrap();
        assert_eq!(store.get(keys::TIMER_STATE).unwrap(), None);

        // Removing a missing key is fine
        store.remove(keys::TIMER_STATE).unwrap();
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("tomato.db");

        {
            let mut store = SqliteStore::with_database(Database::open_at(&db_path).unwrap());
            store.set(keys::LAST_ACTIVE_DATE, "2024-01-15").unwrap();
        }

        let store = SqliteStore::with_database(Database::open_at(&db_path).unwrap());
        assert_eq!(
            store.get(keys::LAST_ACTIVE_DATE).unwrap(),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let mut store = MemoryStore::new();
        let other = store.clone();

        store.set(keys::TASKS, "[]").unwrap();
        assert_eq!(other.get(keys::TASKS).unwrap(), Some("[]".to_string()));
        assert_eq!(other.len(), 1);

        store.remove(keys::TASKS).unwrap();
        assert!(other.is_empty());
    }
}
