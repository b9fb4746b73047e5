//! The Daybook editing session.
//!
//! A [`Session`] owns the live [`daybook_model::AppData`], routes every edit through
//! the immutable row collections, schedules debounced autosaves, and manages named
//! snapshots. Outcomes of user-facing operations are returned as `Result`s and also
//! surfaced as a single transient [`Notification`].

mod config;
mod error;
mod notify;
mod session;
mod validation;

pub use config::{NotificationConfig, SessionConfig};
pub use error::SessionError;
pub use notify::{Notification, NotificationLevel, Notifications};
pub use session::Session;
pub use validation::InputFlags;
