//! Load/save flows between the document store and the file store.
//!
//! Flows are synchronous and take no cross-process locks: two editors of
//! the same id are last-writer-wins, matching the single-session model.

use super::state::DocumentStore;
use crate::error::Result;
use crate::storage::FileStore;

impl DocumentStore {
    /// Fetch `id` from the store and replace the current document.
    ///
    /// A missing document opens as the empty document. On failure the
    /// in-memory document keeps its last known-good state.
    pub fn open(&mut self, store: &FileStore, id: &str) -> Result<()> {
        let doc = store.fetch(id)?;
        self.load(doc)?;
        log::debug!("opened document '{id}' ({} rows)", self.row_count());
        Ok(())
    }

    /// Persist the current document under `id`. Full replace, no merge.
    pub fn save(&self, store: &FileStore, id: &str) -> Result<()> {
        store.save(id, &self.to_value())
    }

    /// Undo the last save of `id` server-side, then re-fetch to
    /// resynchronize with the out-of-band change.
    pub fn revert_last_save(&mut self, store: &FileStore, id: &str) -> Result<()> {
        store.revert_last(id)?;
        self.open(store, id)
    }
}
