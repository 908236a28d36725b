//! BoardContext - I/O primitives for board storage
//!
//! The context provides access to the store and the write gate. No business
//! logic lives here; commands do all the work.

use crate::error::Result;
use crate::storage::{BoardStore, JsonFileStore};
use crate::types::BoardDocument;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Context passed to every command - provides access, not logic
pub struct BoardContext {
    store: Arc<dyn BoardStore>,
    /// Held across a read-modify-write cycle so mutations from one process
    /// never interleave. Writers in other processes are not covered.
    write_gate: Mutex<()>,
}

impl BoardContext {
    /// Create a context over any store
    pub fn new(store: Arc<dyn BoardStore>) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// Create a context backed by a JSON file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::new(path)))
    }

    pub fn store(&self) -> &Arc<dyn BoardStore> {
        &self.store
    }

    /// Check whether a board document exists
    pub async fn is_initialized(&self) -> bool {
        self.store.exists().await
    }

    /// Read the full board document
    pub async fn read_board(&self) -> Result<BoardDocument> {
        self.store.load().await
    }

    /// Write the full board document
    pub async fn write_board(&self, doc: &BoardDocument) -> Result<()> {
        self.store.save(doc).await
    }

    /// Acquire the write gate for a read-modify-write cycle
    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }
}

impl std::fmt::Debug for BoardContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardContext")
            .field("store", &self.store.describe())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_board_io() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::from_path(temp.path().join("data.json"));
        assert!(!ctx.is_initialized().await);

        ctx.write_board(&BoardDocument::default()).await.unwrap();

        assert!(ctx.is_initialized().await);
        let loaded = ctx.read_board().await.unwrap();
        assert_eq!(loaded.columns.len(), 4);
    }

    #[tokio::test]
    async fn test_write_lock_is_exclusive() {
        let ctx = BoardContext::new(Arc::new(MemoryStore::new()));

        let guard = ctx.write_lock().await;
        assert!(ctx.write_gate.try_lock().is_err());
        drop(guard);
        assert!(ctx.write_gate.try_lock().is_ok());
    }
}
