//! Local key/value persistence used when the server is unreachable

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Key under which the card collection is stored
pub const LOCAL_STORE_KEY: &str = "taskboard";

/// A persistent string store addressed by key
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// `None` when nothing has been stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One file per key under a directory
#[derive(Debug, Clone)]
pub struct FileLocalStore {
    dir: PathBuf,
}

impl FileLocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/taskboard`, if the platform has a data directory
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("taskboard"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

#[async_trait]
impl LocalStore for FileLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) if content.is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::local_store(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            ClientError::local_store(format!("failed to create {}: {}", self.dir.display(), e))
        })?;

        let temp_path = path.with_extension("json.tmp");
        let write = async {
            fs::write(&temp_path, value).await?;
            fs::rename(&temp_path, &path).await
        };
        write.await.map_err(|e| {
            ClientError::local_store(format!("failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote local store");
        Ok(())
    }
}

/// In-process store for tests
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStore for MemoryLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
