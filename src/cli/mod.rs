//! Command-line interface for tomato.

pub mod args;
pub mod commands;
