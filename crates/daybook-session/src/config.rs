use std::time::Duration;

use daybook_model::DocumentLayout;
use daybook_storage::AutoSaveConfig;

use crate::notify::NotificationLevel;

/// How long each notification level stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationConfig {
    pub info: Duration,
    pub warning: Duration,
    pub error: Duration,
}

impl NotificationConfig {
    pub fn lifetime(&self, level: NotificationLevel) -> Duration {
        match level {
            NotificationLevel::Info => self.info,
            NotificationLevel::Warning => self.warning,
            NotificationLevel::Error => self.error,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            info: Duration::from_secs(3),
            warning: Duration::from_secs(4),
            error: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub autosave: AutoSaveConfig,
    pub notifications: NotificationConfig,
    /// Row counts used whenever the session has to start from a fresh document.
    pub layout: DocumentLayout,
}
