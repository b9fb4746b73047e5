use daybook_model::{DocumentError, ModelError};
use daybook_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a snapshot name is required")]
    MissingSaveName,
    #[error("no snapshot is selected")]
    MissingSelection,
    #[error("no snapshot named `{0}`")]
    SnapshotNotFound(String),
    #[error("snapshot `{name}` is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: DocumentError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
