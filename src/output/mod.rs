//! Output formatting for tomato.
//!
//! This module renders the timer view, statistics, settings and tasks in
//! the selected output format.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::TomatoError;
use crate::features::tasks::{Task, TaskList};
use crate::features::timer::{Completion, DurationSettings, Statistics, TimerView};

pub use json::*;
pub use pretty::*;

/// Format the timer view based on output format
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_view(
    view: &TimerView,
    active_task: Option<&Task>,
    format: OutputFormat,
) -> Result<String, TomatoError> {
    match format {
        OutputFormat::Pretty => Ok(format_view_pretty(view, active_task)),
        OutputFormat::Json => format_view_json(view, active_task),
    }
}

/// Format a completed interval based on output format
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_completion(completion: &Completion, format: OutputFormat) -> Result<String, TomatoError> {
    match format {
        OutputFormat::Pretty => Ok(format_completion_pretty(completion)),
        OutputFormat::Json => to_json(completion),
    }
}

/// Format daily statistics based on output format
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &Statistics, format: OutputFormat) -> Result<String, TomatoError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}

/// Format duration settings based on output format
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_settings(settings: &DurationSettings, format: OutputFormat) -> Result<String, TomatoError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(settings)),
        OutputFormat::Json => to_json(settings),
    }
}

/// Format the task list based on output format
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_tasks(tasks: &TaskList, format: OutputFormat) -> Result<String, TomatoError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks)),
        OutputFormat::Json => format_tasks_json(tasks),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, TomatoError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}
