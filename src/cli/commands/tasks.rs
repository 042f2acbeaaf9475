//! Task command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, TaskCommands};
use crate::error::TomatoError;
use crate::features::tasks::TaskList;
use crate::output::{format_task, format_task_pretty, format_tasks, to_json};
use crate::storage::KeyValueStore;

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if the task id is unknown, the text is blank, the list
/// cannot be saved, or output formatting fails.
pub fn task(
    store: &mut dyn KeyValueStore,
    cmd: TaskCommands,
    format: OutputFormat,
) -> Result<String, TomatoError> {
    let mut tasks = TaskList::load(store);

    match cmd {
        TaskCommands::List => format_tasks(&tasks, format),

        TaskCommands::Add { text } => {
            let task = tasks.add(&text.join(" "))?;
            tasks.save(store)?;
            format_task(&task, format)
        }

        TaskCommands::Done { id } => {
            let task = tasks.toggle(id)?;
            tasks.save(store)?;
            format_task(&task, format)
        }

        TaskCommands::Remove { id } => {
            let task = tasks.remove(id)?;
            tasks.save(store)?;
            match format {
                OutputFormat::Json => to_json(&json!({ "removed": task })),
                OutputFormat::Pretty => Ok(format!("{} {}", "Removed".red(), task.text)),
            }
        }

        TaskCommands::Activate { id } => {
            let active = tasks.set_active(id)?;
            tasks.save(store)?;
            match (format, active) {
                (OutputFormat::Json, active) => to_json(&json!({ "active_task": active })),
                (OutputFormat::Pretty, Some(task)) => Ok(format_task_pretty(&task)),
                (OutputFormat::Pretty, None) => Ok("No active task".dimmed().to_string()),
            }
        }

        TaskCommands::Clear => {
            let removed = tasks.clear_completed();
            tasks.save(store)?;
            match format {
                OutputFormat::Json => to_json(&json!({ "removed": removed })),
                OutputFormat::Pretty => Ok(format!("Removed {removed} completed task(s)")),
            }
        }
    }
}
