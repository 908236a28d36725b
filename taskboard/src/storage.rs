//! Storage adapters for the board document
//!
//! A store reads and writes the whole [`BoardDocument`] as one unit; there is no
//! partial read or partial write. Any failure to read, parse or write surfaces
//! as [`BoardError::StorageUnavailable`] and is never retried here.

use crate::error::{BoardError, Result};
use crate::types::BoardDocument;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Whole-document load/save
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Read and parse the full document
    async fn load(&self) -> Result<BoardDocument>;

    /// Replace the persisted document with `doc`
    async fn save(&self, doc: &BoardDocument) -> Result<()>;

    /// Whether a document has been persisted yet
    async fn exists(&self) -> bool;

    /// Human-readable location, for logs and errors
    fn describe(&self) -> String;
}

/// A board document kept in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BoardStore for JsonFileStore {
    async fn load(&self) -> Result<BoardDocument> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            BoardError::storage(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let doc: BoardDocument = serde_json::from_str(&content).map_err(|e| {
            BoardError::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(
            path = %self.path.display(),
            cards = doc.cards.len(),
            "loaded board document"
        );
        Ok(doc)
    }

    async fn save(&self, doc: &BoardDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        atomic_write(&self.path, content.as_bytes())
            .await
            .map_err(|e| {
                BoardError::storage(format!("failed to write {}: {}", self.path.display(), e))
            })?;
        tracing::debug!(
            path = %self.path.display(),
            cards = doc.cards.len(),
            "saved board document"
        );
        Ok(())
    }

    async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store for tests and throwaway boards
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: RwLock<Option<BoardDocument>>,
}

impl MemoryStore {
    /// An empty store with no document
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `doc`
    pub fn with_document(doc: BoardDocument) -> Self {
        Self {
            doc: RwLock::new(Some(doc)),
        }
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn load(&self) -> Result<BoardDocument> {
        self.doc
            .read()
            .await
            .clone()
            .ok_or_else(|| BoardError::storage("no board document in memory store"))
    }

    async fn save(&self, doc: &BoardDocument) -> Result<()> {
        *self.doc.write().await = Some(doc.clone());
        Ok(())
    }

    async fn exists(&self) -> bool {
        self.doc.read().await.is_some()
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}
