//! JSON output formatting for tomato.

use serde::Serialize;
use serde_json::json;

use crate::error::TomatoError;
use crate::features::tasks::{Task, TaskList};
use crate::features::timer::TimerView;

/// Format the timer view with the active task as JSON
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_view_json(view: &TimerView, active_task: Option<&Task>) -> Result<String, TomatoError> {
    let output = json!({
        "timer": view,
        "active_task": active_task,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the task list as JSON
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &TaskList) -> Result<String, TomatoError> {
    let items: Vec<&Task> = tasks.iter().collect();
    let output = json!({
        "count": tasks.len(),
        "remaining": tasks.remaining(),
        "items": items,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `TomatoError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TomatoError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::timer::Mode;

    fn view() -> TimerView {
        TimerView {
            mode: Mode::ShortBreak,
            mode_label: "Short Break",
            display: "04:00".to_string(),
            time_remaining: 240,
            total_duration: 300,
            progress: 0.8,
            is_running: true,
            sessions: 1,
            total_focus_minutes: 25,
        }
    }

    #[test]
    fn test_format_view_json() {
        let task = Task::new(1, "write report");
        let output = format_view_json(&view(), Some(&task)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["timer"]["mode"], "shortBreak");
        assert_eq!(parsed["timer"]["time_remaining"], 240);
        assert_eq!(parsed["timer"]["is_running"], true);
        assert_eq!(parsed["active_task"]["text"], "write report");
    }

    #[test]
    fn test_format_view_json_without_task() {
        let output = format_view_json(&view(), None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["active_task"].is_null());
    }

    #[test]
    fn test_format_tasks_json() {
        let mut tasks = TaskList::default();
        tasks.add("a").unwrap();
        tasks.add("b").unwrap();
        tasks.toggle(1).unwrap();

        let output = format_tasks_json(&tasks).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["remaining"], 1);
        assert_eq!(parsed["items"][0]["completed"], true);
    }
}
