//! Completion alerts: desktop notifications and the completion chime.

mod bell;
mod desktop;

pub use bell::TerminalBell;
pub use desktop::DesktopNotifier;

use crate::core::{Notifier, Permission, SoundPlayer};
use crate::error::TomatoError;

/// Alerts that never fire. Notification permission is always denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn permission(&self) -> Permission {
        Permission::Denied
    }

    fn request_permission(&mut self) {}

    fn notify(&self, _title: &str, _body: &str) -> Result<(), TomatoError> {
        Ok(())
    }
}

impl SoundPlayer for Silent {
    fn play_chime(&self) -> Result<(), TomatoError> {
        Ok(())
    }
}
