//! tomato - A Pomodoro timer for the terminal
//!
//! This crate provides the timer/session engine, its persistence, and the
//! command-line and full-screen front ends that drive it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TomatoError;
pub use features::timer::Engine;
