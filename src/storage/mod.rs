//! Storage layer for tomato.
//!
//! This module provides `SQLite`-based persistence behind a string
//! key-value interface for:
//! - Timer duration settings
//! - The running-timer snapshot and resting position
//! - Daily session statistics
//! - The task list

mod database;
pub mod kv;
mod migrations;

pub use database::Database;
pub use kv::{keys, KeyValueStore, MemoryStore, SqliteStore};
