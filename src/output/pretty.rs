use colored::{ColoredString, Colorize};

use crate::features::tasks::{Task, TaskList};
use crate::features::timer::{
    format_minutes, render_progress_bar, Completion, DurationSettings, Mode, Statistics, TimerView,
};

const BAR_WIDTH: usize = 30;

/// Color a mode label the way every view shows it.
pub fn paint_mode(mode: Mode, text: &str) -> ColoredString {
    match mode {
        Mode::Work => text.red(),
        Mode::ShortBreak => text.green(),
        Mode::LongBreak => text.blue(),
    }
}

/// One-line status, used by the watch loop
pub fn format_view_line(view: &TimerView) -> String {
    let state = if view.is_running { "▶" } else { "⏸" };
    format!(
        "{} {} {} {}",
        state,
        paint_mode(view.mode, view.mode_label).bold(),
        view.display.bold(),
        render_progress_bar(view.progress, BAR_WIDTH).dimmed()
    )
}

/// Format the timer view as pretty output
pub fn format_view_pretty(view: &TimerView, active_task: Option<&Task>) -> String {
    let state = if view.is_running {
        "running".green()
    } else if view.time_remaining < view.total_duration {
        "paused".yellow()
    } else {
        "idle".dimmed()
    };

    let mut output = format!(
        "🍅 {}  {}\n",
        paint_mode(view.mode, view.mode_label).bold(),
        state
    );
    output.push_str(&format!(
        "   {}  {}\n",
        view.display.bold(),
        render_progress_bar(view.progress, BAR_WIDTH)
    ));
    output.push_str(&format!(
        "   {}: {}  {}: {}\n",
        "Sessions".dimmed(),
        view.sessions,
        "Focus".dimmed(),
        format_minutes(view.total_focus_minutes)
    ));

    if let Some(task) = active_task {
        output.push_str(&format!("   {}: {}\n", "Task".dimmed(), task.text));
    }

    output
}

/// Format a completed interval as pretty output
pub fn format_completion_pretty(completion: &Completion) -> String {
    let (title, body) = completion.notification();
    format!(
        "🔔 {} {} {}",
        title.bold(),
        body,
        format!("Next: {}", completion.next.label()).dimmed()
    )
}

/// Format daily statistics as pretty output
pub fn format_stats_pretty(stats: &Statistics) -> String {
    let mut output = "Today\n".bold().to_string();
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  {}: {}\n",
        "Sessions completed".dimmed(),
        stats.sessions.to_string().bold()
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Focus time".dimmed(),
        format_minutes(stats.total_focus_minutes).bold()
    ));
    if let Some(date) = &stats.last_active_date {
        output.push_str(&format!("  {}: {}\n", "Date".dimmed(), date));
    }
    output
}

/// Format duration settings as pretty output
pub fn format_settings_pretty(settings: &DurationSettings) -> String {
    let mut output = "Durations\n".bold().to_string();
    output.push_str(&"─".repeat(40));
    output.push('\n');
    for mode in Mode::ALL {
        output.push_str(&format!(
            "  {:<12} {}\n",
            paint_mode(mode, mode.label()),
            format_minutes(settings.minutes(mode))
        ));
    }
    output
}

/// Format a single task line
pub fn format_task_pretty(task: &Task) -> String {
    let icon = if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    };
    let text = if task.completed {
        task.text.strikethrough().dimmed().to_string()
    } else if task.active {
        task.text.bold().to_string()
    } else {
        task.text.clone()
    };

    let mut line = format!("{} {} {}", icon, format!("{:>3}", task.id).dimmed(), text);
    if task.active {
        line.push_str(&format!("  {}", "◀ active".cyan()));
    }
    line
}

/// Format the task list as pretty output
pub fn format_tasks_pretty(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "Tasks (0)\n  No tasks".to_string();
    }

    let mut output = format!("Tasks ({} open of {})\n", tasks.remaining(), tasks.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for task in tasks.iter() {
        output.push_str(&format_task_pretty(task));
        output.push('\n');
    }

    output
}
