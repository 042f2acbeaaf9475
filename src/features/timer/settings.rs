//! Interval duration settings.
//!
//! Stored under the `settings` key as `{"work": 25, "shortBreak": 5,
//! "longBreak": 15}` (minutes). Each field is validated on its own: a
//! positive integer is clamped into its range, anything else falls back to
//! the field's default while the other fields still apply.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::mode::Mode;
use crate::error::TomatoError;
use crate::storage::{keys, KeyValueStore};

/// Allowed minutes for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteRange {
    /// Smallest accepted value
    pub min: u32,
    /// Largest accepted value
    pub max: u32,
    /// Value used when input is missing or invalid
    pub default: u32,
}

impl MinuteRange {
    /// Clamp a positive value into range.
    #[must_use]
    pub const fn clamp(&self, minutes: u32) -> u32 {
        if minutes < self.min {
            self.min
        } else if minutes > self.max {
            self.max
        } else {
            minutes
        }
    }

    /// Interpret a stored JSON value. Only positive integers are accepted.
    #[must_use]
    pub fn from_json(&self, value: &Value) -> Option<u32> {
        let minutes = value.as_u64().filter(|m| *m > 0)?;
        Some(u32::try_from(minutes).map_or(self.max, |m| self.clamp(m)))
    }

    /// Interpret user input. Non-numeric, zero, or negative input yields the
    /// default; anything else is truncated to whole minutes and clamped.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_input(&self, input: &str) -> u32 {
        match input.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 1.0 => {
                if value >= f64::from(self.max) {
                    self.max
                } else {
                    self.clamp(value as u32)
                }
            }
            _ => self.default,
        }
    }
}

/// Work minutes: 1–120, default 25.
pub const WORK_RANGE: MinuteRange = MinuteRange {
    min: 1,
    max: 120,
    default: 25,
};

/// Short break minutes: 1–30, default 5.
pub const SHORT_BREAK_RANGE: MinuteRange = MinuteRange {
    min: 1,
    max: 30,
    default: 5,
};

/// Long break minutes: 1–60, default 15.
pub const LONG_BREAK_RANGE: MinuteRange = MinuteRange {
    min: 1,
    max: 60,
    default: 15,
};

/// Configured interval lengths, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationSettings {
    /// Work interval minutes
    pub work: u32,
    /// Short break minutes
    pub short_break: u32,
    /// Long break minutes
    pub long_break: u32,
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self {
            work: WORK_RANGE.default,
            short_break: SHORT_BREAK_RANGE.default,
            long_break: LONG_BREAK_RANGE.default,
        }
    }
}

impl DurationSettings {
    /// Range for a mode.
    #[must_use]
    pub const fn range(mode: Mode) -> MinuteRange {
        match mode {
            Mode::Work => WORK_RANGE,
            Mode::ShortBreak => SHORT_BREAK_RANGE,
            Mode::LongBreak => LONG_BREAK_RANGE,
        }
    }

    /// Configured minutes for a mode.
    #[must_use]
    pub const fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    /// Configured duration for a mode, in seconds.
    #[must_use]
    pub const fn duration_secs(&self, mode: Mode) -> u32 {
        self.minutes(mode) * 60
    }

    fn set_minutes(&mut self, mode: Mode, minutes: u32) {
        match mode {
            Mode::Work => self.work = minutes,
            Mode::ShortBreak => self.short_break = minutes,
            Mode::LongBreak => self.long_break = minutes,
        }
    }

    /// Parse the persisted JSON form, validating field by field.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a JSON object.
    pub fn from_json(raw: &str) -> Result<Self, TomatoError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(fields) = value else {
            return Err(TomatoError::InvalidArgument(
                "settings must be a JSON object".to_string(),
            ));
        };

        let mut settings = Self::default();
        for mode in Mode::ALL {
            let Some(field) = fields.get(mode.as_str()) else {
                continue;
            };
            match Self::range(mode).from_json(field) {
                Some(minutes) => settings.set_minutes(mode, minutes),
                None => warn!(field = mode.as_str(), value = %field, "ignoring invalid duration setting"),
            }
        }

        Ok(settings)
    }

    /// Apply user input on top of these settings. Fields given as `None`
    /// keep their current value.
    #[must_use]
    pub fn with_input(self, work: Option<&str>, short_break: Option<&str>, long_break: Option<&str>) -> Self {
        let mut settings = self;
        for (mode, input) in [
            (Mode::Work, work),
            (Mode::ShortBreak, short_break),
            (Mode::LongBreak, long_break),
        ] {
            if let Some(input) = input {
                settings.set_minutes(mode, Self::range(mode).from_input(input));
            }
        }
        settings
    }

    /// Load settings from the store, falling back to defaults.
    ///
    /// A malformed entry is logged and deleted.
    pub fn load(store: &mut dyn KeyValueStore) -> Self {
        let raw = match store.get(keys::SETTINGS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "failed to read settings, using defaults");
                return Self::default();
            }
        };

        match Self::from_json(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "discarding malformed settings");
                if let Err(e) = store.remove(keys::SETTINGS) {
                    warn!(error = %e, "failed to delete malformed settings");
                }
                Self::default()
            }
        }
    }

    /// Persist these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), TomatoError> {
        store.set(keys::SETTINGS, &serde_json::to_string(self)?)
    }
}
