//! File-backed document storage.

pub mod store;
pub mod validate;

pub use store::{FileStore, UploadReceipt, DEFAULT_MAX_UPLOAD_BYTES};
pub use validate::Limits;
