//! Task list kept beside the timer.
//!
//! Tasks share the timer's key-value store but are otherwise independent of
//! it. At most one task is active: the one the current work interval is
//! spent on.

mod list;
mod task;

pub use list::TaskList;
pub use task::Task;
