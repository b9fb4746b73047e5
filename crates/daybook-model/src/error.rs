use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("row index {index} is out of bounds (row count {len})")]
    RowOutOfBounds { index: usize, len: usize },
}
