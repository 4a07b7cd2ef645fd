//! Error types for jsongrid core.

use thiserror::Error;

/// Errors that can occur in the document engine and file store.
///
/// Every mutation failure leaves the document in its prior valid state.
#[derive(Error, Debug)]
pub enum JsonGridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    Validation(String),

    #[error("Column limit reached ({limit} max)")]
    Capacity { limit: usize },

    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("Row {index} out of bounds (document has {len} rows)")]
    RowOutOfBounds { index: usize, len: usize },

    #[error("Nested row {index} out of bounds (table has {len} rows)")]
    NestedRowOutOfBounds { index: usize, len: usize },

    #[error("No column '{0}' in this record")]
    UnknownColumn(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("A nested column needs at least one sub-column")]
    MissingSubColumns,

    #[error("Invalid document id '{0}'")]
    InvalidId(String),

    #[error("No document '{0}'")]
    NotFound(String),

    #[error("Upload too large ({size} bytes, max {max})")]
    UploadTooLarge { size: u64, max: u64 },

    #[error("Nothing to revert for '{0}'")]
    NothingToRevert(String),
}

pub type Result<T> = std::result::Result<T, JsonGridError>;
