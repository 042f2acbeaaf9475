//! Schema migrations for tomato.
//!
//! The schema version lives in `PRAGMA user_version`. Opening a database
//! applies every step above the stored version, each in its own
//! transaction.

use rusqlite::Connection;
use tracing::info;

use crate::error::TomatoError;

/// Ordered schema steps; step `i` upgrades version `i` to `i + 1`.
const STEPS: &[&str] = &[
    // v1: string key-value table
    r"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    ",
];

/// Schema version stored in the database; 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, TomatoError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| TomatoError::Database(format!("Failed to get schema version: {e}")))
}

/// Apply all pending steps.
pub fn run(conn: &Connection) -> Result<(), TomatoError> {
    let current = get_version(conn)?;

    for (version, sql) in (1_i32..).zip(STEPS).skip(usize::try_from(current).unwrap_or(0)) {
        let batch = format!("BEGIN;\n{sql}\nPRAGMA user_version = {version};\nCOMMIT;");
        conn.execute_batch(&batch).map_err(|e| {
            TomatoError::Database(format!("Migration v{version} failed: {e}"))
        })?;
        info!(version, "applied schema migration");
    }

    Ok(())
}
