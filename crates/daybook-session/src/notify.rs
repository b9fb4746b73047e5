use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A transient message about the outcome of a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub raised_at: Instant,
    pub lifetime: Duration,
}

impl Notification {
    pub fn expires_at(&self) -> Instant {
        self.raised_at + self.lifetime
    }

    pub fn is_active_at(&self, now: Instant) -> bool {
        now < self.expires_at()
    }
}

/// The single notification slot of a session.
///
/// Cloning yields another handle onto the same slot, so the autosave task can
/// report failures into it. Pushing replaces whatever was shown before.
#[derive(Debug, Clone)]
pub struct Notifications {
    current: Arc<Mutex<Option<Notification>>>,
    config: NotificationConfig,
}

impl Notifications {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            current: Arc::default(),
            config,
        }
    }

    pub fn push(&self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification {
            message: message.into(),
            level,
            raised_at: Instant::now(),
            lifetime: self.config.lifetime(level),
        };
        log::debug!("notification ({level:?}): {}", notification.message);
        *self.lock() = Some(notification);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    /// The most recent notification, if it has not expired by `now`.
    pub fn active(&self, now: Instant) -> Option<Notification> {
        self.lock()
            .as_ref()
            .filter(|notification| notification.is_active_at(now))
            .cloned()
    }

    /// The most recent notification regardless of expiry.
    pub fn latest(&self) -> Option<Notification> {
        self.lock().clone()
    }

    pub fn dismiss(&self) {
        self.lock().take();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Notification>> {
        self.current.lock().expect("notification mutex poisoned")
    }
}
