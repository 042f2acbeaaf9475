//! Configuration management for tomato.
//!
//! This module handles loading configuration from `~/.tomato/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{AlertsConfig, ColorSetting, Config, GeneralConfig};
