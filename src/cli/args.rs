use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::HOME_ENV;

#[derive(Parser)]
#[command(name = "tomato")]
#[command(about = "A Pomodoro timer for the terminal")]
#[command(long_about = "tomato - A Pomodoro timer for the terminal

Alternates work intervals with short breaks, and takes a long break after
every fourth work session. A running timer keeps counting while tomato is
not running: the next command picks it up where the clock says it is.

QUICK START:
  tomato start              Start (or pause) the timer
  tomato status --watch     Follow the countdown
  tomato run --continuous   Run interval after interval in the foreground
  tomato tui                Full-screen timer

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  tomato <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to
    /// `general.default_output` from config.yaml.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding config.yaml and the timer database
    #[arg(long, global = true, env = HOME_ENV, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the timer, or pause it if it is running
    ///
    /// The countdown continues after this command exits. Use
    /// 'tomato status' to check on it, or 'tomato run' to follow it.
    #[command(alias = "s")]
    Start,

    /// Pause the timer, keeping the remaining time
    #[command(alias = "p")]
    Pause,

    /// Stop the timer and restart the current interval
    Reset,

    /// Switch to another mode with a full interval
    ///
    /// Stops the timer. Modes: work, shortBreak (short), longBreak (long).
    ///
    /// # Examples
    ///
    ///   tomato switch short
    ///   tomato switch longBreak
    Switch {
        /// Mode to switch to
        mode: String,
    },

    /// Show the timer
    #[command(alias = "st")]
    Status {
        /// Watch mode - keep updating until the interval completes
        #[arg(long, short = 'w')]
        watch: bool,
    },

    /// Start the timer if needed and follow it in the foreground
    Run {
        /// Start the next interval after each completion
        #[arg(long, short = 'c')]
        continuous: bool,
    },

    /// Show today's sessions and focus time
    Stats,

    /// Show or change interval durations
    Settings(SettingsArgs),

    /// Manage the task list
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Full-screen interactive timer
    ///
    /// Keys: space start/pause, r reset, 1/2/3 switch mode, q quit.
    Tui,

    /// Generate shell completions
    ///
    /// Example: tomato completions bash > ~/.bash_completion.d/tomato
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for settings.
#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the configured durations
    Show,

    /// Change durations, in minutes
    ///
    /// Values are clamped to their range (work 1-120, short 1-30,
    /// long 1-60). Zero or non-numeric values restore the default.
    ///
    /// # Examples
    ///
    ///   tomato settings set --work 50 --short 10
    Set {
        /// Work interval minutes
        #[arg(long, short = 'w')]
        work: Option<String>,

        /// Short break minutes
        #[arg(long, short = 's')]
        short: Option<String>,

        /// Long break minutes
        #[arg(long, short = 'l')]
        long: Option<String>,
    },
}

/// Arguments for tasks.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    ///
    /// Example: tomato task add write the quarterly report
    #[command(alias = "a")]
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List,

    /// Toggle a task between open and completed
    Done {
        /// Task ID
        id: u64,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Remove {
        /// Task ID
        id: u64,
    },

    /// Focus on a task, or stop focusing on it if it is already active
    Activate {
        /// Task ID
        id: u64,
    },

    /// Delete all completed tasks
    Clear,
}
