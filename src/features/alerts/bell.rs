//! Terminal bell completion chime.

use std::cell::RefCell;
use std::io::{self, Write};

use crate::core::SoundPlayer;
use crate::error::TomatoError;

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell. Writes to stderr so JSON on stdout stays clean.
pub struct TerminalBell<W: Write = io::Stderr> {
    enabled: bool,
    out: RefCell<W>,
}

impl TerminalBell {
    /// A bell on stderr, silent unless `enabled`.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self::with_writer(enabled, io::stderr())
    }
}

impl<W: Write> TerminalBell<W> {
    /// A bell writing to `out`.
    pub fn with_writer(enabled: bool, out: W) -> Self {
        Self {
            enabled,
            out: RefCell::new(out),
        }
    }

    /// Consume the bell, returning its writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> SoundPlayer for TerminalBell<W> {
    fn play_chime(&self) -> Result<(), TomatoError> {
        if !self.enabled {
            return Ok(());
        }
        let mut out = self.out.borrow_mut();
        out.write_all(BEL)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_when_enabled() {
        let bell = TerminalBell::with_writer(true, Vec::new());
        bell.play_chime().unwrap();
        bell.play_chime().unwrap();
        assert_eq!(bell.into_inner(), b"\x07\x07");
    }

    #[test]
    fn test_silent_when_disabled() {
        let bell = TerminalBell::with_writer(false, Vec::new());
        bell.play_chime().unwrap();
        assert!(bell.into_inner().is_empty());
    }
}
