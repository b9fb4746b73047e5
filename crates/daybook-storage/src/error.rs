use std::path::PathBuf;

use daybook_model::DocumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed document: {0}")]
    Document(#[from] DocumentError),
    #[error("storage quota exceeded writing `{key}`: {required} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        required: usize,
        limit: usize,
    },
    #[error("store file {} is not a JSON object of string slots", path.display())]
    CorruptStore { path: PathBuf },
    #[error("autosave task is no longer running")]
    AutoSaveStopped,
}

pub type Result<T> = std::result::Result<T, StorageError>;
