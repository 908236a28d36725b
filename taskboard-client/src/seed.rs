//! Sources for the cards written into an empty local store

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use taskboard::{BoardDocument, Card};

/// Supplies the initial cards for a fresh local store
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn seed(&self) -> Result<Vec<Card>>;
}

/// The dataset compiled into the `taskboard` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSeed;

#[async_trait]
impl SeedSource for BundledSeed {
    async fn seed(&self) -> Result<Vec<Card>> {
        let doc = taskboard::default_board()
            .map_err(|e| ClientError::local_store(e.to_string()))?;
        Ok(doc.cards)
    }
}

/// A board document on disk, such as the server's `data.json`
#[derive(Debug, Clone)]
pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedSource for FileSeed {
    async fn seed(&self) -> Result<Vec<Card>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ClientError::local_store(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let doc: BoardDocument = serde_json::from_str(&content)?;
        Ok(doc.cards)
    }
}
