//! File-backed document storage.
//!
//! Documents live as `data_<id>.json` under one root directory, pretty
//! printed. Each save keeps the previous on-disk revision as a `.bak`
//! sibling, giving `revert_last` exactly one step of history. There is no
//! cross-process locking; concurrent savers are last-writer-wins.

use crate::error::{JsonGridError, Result};
use crate::storage::validate::{self, Limits};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 1024 * 1024;

/// Outcome of an upload: the freshly assigned id plus a user-facing note.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub id: String,
    pub message: String,
}

pub struct FileStore {
    root: PathBuf,
    limits: Limits,
    max_upload_bytes: u64,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore {
            root: root.into(),
            limits: Limits::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn data_path(&self, id: &str) -> Result<PathBuf> {
        check_id(id)?;
        Ok(self.root.join(format!("data_{id}.json")))
    }

    fn backup_path(&self, id: &str) -> Result<PathBuf> {
        check_id(id)?;
        Ok(self.root.join(format!("data_{id}.json.bak")))
    }

    /// Whether a document is stored under `id`.
    pub fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.data_path(id)?.exists())
    }

    /// Read the document stored under `id`.
    ///
    /// A missing or empty file yields the empty document, so a fresh id is
    /// immediately editable.
    pub fn fetch(&self, id: &str) -> Result<Value> {
        let path = self.data_path(id)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Value::Array(Vec::new())),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist `doc` under `id`, replacing the stored document wholesale.
    ///
    /// The document is structure-validated first; the previous revision, if
    /// any, is kept for [`revert_last`](FileStore::revert_last).
    pub fn save(&self, id: &str, doc: &Value) -> Result<()> {
        validate::check_document(doc, &self.limits)?;
        let path = self.data_path(id)?;
        fs::create_dir_all(&self.root)?;
        if path.exists() {
            fs::copy(&path, self.backup_path(id)?)?;
        }
        fs::write(&path, serde_json::to_string_pretty(doc)?)?;
        log::info!("saved document '{id}'");
        Ok(())
    }

    /// Ingest a foreign JSON payload under a freshly assigned id.
    pub fn upload(&self, bytes: &[u8]) -> Result<UploadReceipt> {
        let size = bytes.len() as u64;
        if size > self.max_upload_bytes {
            return Err(JsonGridError::UploadTooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }
        let doc: Value = serde_json::from_slice(bytes)?;
        validate::check_document(&doc, &self.limits)?;

        let id = generate_id();
        fs::create_dir_all(&self.root)?;
        fs::write(self.data_path(&id)?, serde_json::to_string_pretty(&doc)?)?;
        log::info!("uploaded document '{id}' ({size} bytes)");
        Ok(UploadReceipt {
            id,
            message: "File uploaded and saved.".to_string(),
        })
    }

    /// Export the stored document as pretty JSON.
    pub fn download(&self, id: &str) -> Result<String> {
        if !self.exists(id)? {
            return Err(JsonGridError::NotFound(id.to_string()));
        }
        let doc = self.fetch(id)?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Restore the revision kept by the last save. One step only; callers
    /// must re-fetch afterwards to resynchronize.
    pub fn revert_last(&self, id: &str) -> Result<()> {
        let backup = self.backup_path(id)?;
        if !backup.exists() {
            return Err(JsonGridError::NothingToRevert(id.to_string()));
        }
        fs::rename(&backup, self.data_path(id)?)?;
        log::info!("reverted document '{id}' to its previous save");
        Ok(())
    }

    /// Delete stored documents (and their backups) older than `max_age`.
    /// Returns the number of files removed.
    pub fn sweep_stale(&self, max_age: Duration) -> Result<usize> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let now = SystemTime::now();
        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with("data_") {
                continue;
            }
            if !name.ends_with(".json") && !name.ends_with(".json.bak") {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age > max_age {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        if removed > 0 {
            log::info!("swept {removed} stale document file(s)");
        }
        Ok(removed)
    }
}

/// Ids become file names, so only plain identifier characters are allowed.
fn check_id(id: &str) -> Result<()> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(JsonGridError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// A random 8-byte hex id for uploaded documents.
fn generate_id() -> String {
    let bytes: [u8; 8] = rand::random();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_fetch_missing_yields_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.fetch("demo").unwrap(), json!([]));
    }

    #[test]
    fn test_fetch_empty_file_yields_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(dir.path().join("data_demo.json"), "").unwrap();
        assert_eq!(store.fetch("demo").unwrap(), json!([]));
    }

    #[test]
    fn test_save_then_fetch_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let doc = json!([{"id": 1, "kpis": [{"metric": "Revenue", "value": 100}]}]);
        store.save("demo", &doc).unwrap();
        assert_eq!(store.fetch("demo").unwrap(), doc);
    }

    #[test]
    fn test_save_rejects_structure_violations() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).with_limits(Limits {
            max_keys_per_record: 2,
        });
        let wide = json!([{"a": 1, "b": 2, "c": 3}]);
        assert!(matches!(
            store.save("demo", &wide),
            Err(JsonGridError::Validation(_))
        ));
        let deep = json!([{"a": {"b": {"c": 1}}}]);
        assert!(matches!(
            store.save("demo", &deep),
            Err(JsonGridError::Validation(_))
        ));
        assert!(!store.exists("demo").unwrap());
    }

    #[test]
    fn test_invalid_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        for id in ["", "../evil", "a/b", "a b"] {
            assert!(matches!(
                store.fetch(id),
                Err(JsonGridError::InvalidId(_))
            ));
        }
    }

    #[test]
    fn test_upload_assigns_a_fresh_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let payload = serde_json::to_vec(&json!([{"a": 1}])).unwrap();
        let receipt = store.upload(&payload).unwrap();
        assert_eq!(receipt.id.len(), 16);
        assert_eq!(store.fetch(&receipt.id).unwrap(), json!([{"a": 1}]));
    }

    #[test]
    fn test_upload_enforces_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).with_max_upload_bytes(4);
        assert!(matches!(
            store.upload(b"[1, 2, 3]"),
            Err(JsonGridError::UploadTooLarge { size: 9, max: 4 })
        ));
    }

    #[test]
    fn test_upload_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.upload(b"not json"),
            Err(JsonGridError::Json(_))
        ));
    }

    #[test]
    fn test_download_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.download("demo"),
            Err(JsonGridError::NotFound(_))
        ));
    }

    #[test]
    fn test_revert_last_restores_previous_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save("demo", &json!([{"a": "first"}])).unwrap();
        store.save("demo", &json!([{"a": "second"}])).unwrap();

        store.revert_last("demo").unwrap();
        assert_eq!(store.fetch("demo").unwrap(), json!([{"a": "first"}]));

        // One step of history only.
        assert!(matches!(
            store.revert_last("demo"),
            Err(JsonGridError::NothingToRevert(_))
        ));
    }

    #[test]
    fn test_sweep_stale_honors_age() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save("old", &json!([{"a": 1}])).unwrap();

        // Nothing young enough to sweep.
        assert_eq!(store.sweep_stale(Duration::from_secs(3600)).unwrap(), 0);
        assert!(store.exists("old").unwrap());

        std::thread::sleep(Duration::from_millis(25));
        let removed = store.sweep_stale(Duration::from_millis(1)).unwrap();
        assert_eq!(removed, 1);
        assert!(!store.exists("old").unwrap());
    }

    #[test]
    fn test_sweep_ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(store.sweep_stale(Duration::from_millis(1)).unwrap(), 0);
        assert!(dir.path().join("notes.txt").exists());
    }
}
