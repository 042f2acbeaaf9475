//! `SQLite` database connection.
//!
//! The database lives at `<data root>/tomato.db` and holds the key-value
//! table behind settings, timer state, statistics and tasks.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::config::Paths;
use crate::error::TomatoError;

use super::migrations;

/// Database connection wrapper. Opening always brings the schema up to date.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open `tomato.db` under the given data root, creating both if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created, or
    /// the schema cannot be migrated.
    pub fn open_with_paths(paths: &Paths) -> Result<Self, TomatoError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, TomatoError> {
        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path).map_err(|e| {
            TomatoError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        Self::migrated(conn)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or migrated.
    pub fn open_in_memory() -> Result<Self, TomatoError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TomatoError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::migrated(conn)
    }

    fn migrated(conn: Connection) -> Result<Self, TomatoError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
