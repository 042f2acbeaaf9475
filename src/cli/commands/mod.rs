//! Command implementations for tomato.
//!
//! Every command returns the text to print in the selected output format.

mod completions;
mod settings;
mod stats;
mod tasks;
mod timer;

pub use completions::completions;
pub use settings::settings;
pub use stats::stats;
pub use tasks::task;
pub use timer::{pause, reset, run, start, status, switch};
