//! Subcommand implementations
//!
//! Each command returns the text to print so it can be exercised without a
//! terminal. `serve` and `watch` run until interrupted.

pub mod board;
pub mod cards;
pub mod init;
pub mod serve;
pub mod watch;

use crate::config::Config;
use std::sync::Arc;
use taskboard_client::{
    BoardClient, BundledSeed, FileLocalStore, FileSeed, SeedSource, SyncSession,
};

/// Actor recorded for operations run from the command line
pub const CLI_ACTOR: &str = "cli";

/// Start a sync session for the configured server and local store.
///
/// An empty local store is seeded from the board document when one exists,
/// otherwise from the bundled dataset.
pub async fn open_session(config: &Config) -> SyncSession {
    let remote = Arc::new(BoardClient::new(&config.server_url));
    let store = Arc::new(FileLocalStore::new(config.resolved_local_store_dir()));
    let seed: Arc<dyn SeedSource> = if config.data_file.exists() {
        Arc::new(FileSeed::new(&config.data_file))
    } else {
        Arc::new(BundledSeed)
    };
    SyncSession::start(remote, store, seed).await
}
