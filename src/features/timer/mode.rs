//! Timer modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TomatoError;

/// One of the three timer phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Focused work
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break after every fourth work session
    LongBreak,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Self; 3] = [Self::Work, Self::ShortBreak, Self::LongBreak];

    /// Name used in persisted state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "shortBreak",
            Self::LongBreak => "longBreak",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break mode.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Parse a mode name. Accepts the persisted names plus a few shorthands.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "work" | "w" | "focus" | "pomodoro" => Some(Self::Work),
            "shortbreak" | "short-break" | "short_break" | "short" | "s" => Some(Self::ShortBreak),
            "longbreak" | "long-break" | "long_break" | "long" | "l" => Some(Self::LongBreak),
            _ => None,
        }
    }
}

impl FromStr for Mode {
    type Err = TomatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TomatoError::InvalidMode(s.to_string()))
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("work"), Some(Mode::Work));
        assert_eq!(Mode::parse("shortBreak"), Some(Mode::ShortBreak));
        assert_eq!(Mode::parse("short"), Some(Mode::ShortBreak));
        assert_eq!(Mode::parse("longBreak"), Some(Mode::LongBreak));
        assert_eq!(Mode::parse(" LONG-BREAK "), Some(Mode::LongBreak));
        assert_eq!(Mode::parse("nap"), None);
        assert_eq!(Mode::parse(""), None);
    }

    #[test]
    fn test_mode_from_str_error() {
        let err = "siesta".parse::<Mode>().unwrap_err();
        assert!(matches!(err, TomatoError::InvalidMode(name) if name == "siesta"));
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::ShortBreak).unwrap(), "\"shortBreak\"");
        assert_eq!(
            serde_json::from_str::<Mode>("\"longBreak\"").unwrap(),
            Mode::LongBreak
        );
        assert!(serde_json::from_str::<Mode>("\"nap\"").is_err());

        for mode in Mode::ALL {
            assert_eq!(
                serde_json::to_string(&mode).unwrap(),
                format!("\"{}\"", mode.as_str())
            );
        }
    }

    #[test]
    fn test_mode_is_break() {
        assert!(!Mode::Work.is_break());
        assert!(Mode::ShortBreak.is_break());
        assert!(Mode::LongBreak.is_break());
    }
}
