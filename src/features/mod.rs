//! Feature modules for tomato.
//!
//! - `timer`: the Pomodoro interval engine, settings and daily statistics
//! - `tasks`: the task list shown beside the timer
//! - `alerts`: desktop notifications and the completion chime

pub mod alerts;
pub mod tasks;
pub mod timer;
