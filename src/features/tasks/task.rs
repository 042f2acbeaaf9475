//! Task data type.

use serde::{Deserialize, Serialize};

/// A to-do item shown beside the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, stable identifier
    pub id: u64,
    /// What to work on
    pub text: String,
    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,
    /// Whether this is the task currently being focused on
    #[serde(default)]
    pub active: bool,
}

impl Task {
    /// Create an open, inactive task.
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            active: false,
        }
    }
}
