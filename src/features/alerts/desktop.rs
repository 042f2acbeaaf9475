//! Desktop notifications.

use notify_rust::Notification;
use tracing::debug;

use crate::config::AlertsConfig;
use crate::core::{Notifier, Permission};
use crate::error::TomatoError;

const APP_NAME: &str = "tomato";

/// Shows completion notifications through the desktop notification service.
///
/// The desktop has no permission prompt of its own, so permission comes from
/// the `alerts.notifications` config flag: enabled means granted.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    permission: Permission,
}

impl DesktopNotifier {
    /// Create a notifier with an explicit permission state.
    #[must_use]
    pub const fn with_permission(permission: Permission) -> Self {
        Self { permission }
    }

    /// Create a notifier from the alerts config.
    #[must_use]
    pub const fn from_config(config: &AlertsConfig) -> Self {
        Self::with_permission(if config.notifications {
            Permission::Granted
        } else {
            Permission::Denied
        })
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) {
        if self.permission == Permission::Default {
            debug!("granting desktop notification permission");
            self.permission = Permission::Granted;
        }
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), TomatoError> {
        Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(body)
            .show()
            .map_err(|e| TomatoError::Notification(e.to_string()))?;
        Ok(())
    }
}
