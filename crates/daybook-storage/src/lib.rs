//! Durable storage for Daybook documents.
//!
//! Everything is persisted through a string key-value store ([`KeyValueStore`]), the
//! same shape as browser local storage. This crate exposes:
//! - in-memory and single-file store implementations, both with an optional byte quota
//! - atomic file replacement for the file-backed store
//! - the slot naming scheme (one autosave slot, N named snapshot slots)
//! - JSON read/write of [`daybook_model::AppData`] into a slot
//! - a debounced autosave task ([`AutoSaveManager`])

mod autosave;
mod documents;
mod error;
mod fs;
pub mod slots;
mod store;

pub use autosave::{AutoSaveConfig, AutoSaveManager, SaveErrorHook};
pub use documents::{read_document, write_document};
pub use error::{Result, StorageError};
pub use fs::atomic_write_bytes;
pub use store::{FileStore, KeyValueStore, MemoryStore};
