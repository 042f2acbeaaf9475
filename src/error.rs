//! Error types for tomato.

use thiserror::Error;

/// Errors that can occur in tomato.
#[derive(Error, Debug)]
pub enum TomatoError {
    /// Configuration or path resolution failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The SQLite database could not be opened, migrated, or queried.
    #[error("Database error: {0}")]
    Database(String),

    /// A key-value store operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON (de)serialization failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mode name did not match any known timer mode.
    #[error("Unknown timer mode: {0}")]
    InvalidMode(String),

    /// A user-supplied argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A desktop notification could not be shown.
    #[error("Notification error: {0}")]
    Notification(String),

    /// The terminal UI could not be driven.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<rusqlite::Error> for TomatoError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
