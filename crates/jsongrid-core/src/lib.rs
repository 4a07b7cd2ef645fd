//! jsongrid-core - document model, mutation engine, and file-backed storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{CellPath, CellView, ColumnKind, DocumentStore, FieldKind, GridView, Record};
pub use error::{JsonGridError, Result};
pub use storage::{FileStore, Limits, UploadReceipt};
