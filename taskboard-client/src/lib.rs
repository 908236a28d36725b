//! Client sync layer for the task board
//!
//! A [`SyncSession`] decides once, at startup, whether the server is
//! reachable. When it is, cards are loaded and saved through the HTTP API and
//! a poller picks up changes made by other clients. When it is not, cards live
//! in a local key/value store seeded from the bundled dataset.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use taskboard_client::{
//!     spawn_poller, BoardClient, BundledSeed, CardForm, MemoryLocalStore, SyncSession,
//! };
//! use tokio::sync::Mutex;
//!
//! # async fn example() -> taskboard_client::Result<()> {
//! let mut session = SyncSession::start(
//!     Arc::new(BoardClient::new("http://127.0.0.1:3000")),
//!     Arc::new(MemoryLocalStore::new()),
//!     Arc::new(BundledSeed),
//! )
//! .await;
//! session.load().await?;
//! session.save_card(CardForm::new("Write docs")).await?;
//!
//! let session = Arc::new(Mutex::new(session));
//! if let Some(poller) = spawn_poller(session.clone(), Duration::from_secs(5)).await {
//!     poller.shutdown().await;
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod local;
mod poller;
mod seed;
mod session;
mod view;

pub use client::{BoardClient, HealthStatus, RemoteBoard, DEFAULT_PROBE_TIMEOUT, DEFAULT_SERVER_URL};
pub use error::{ClientError, Result};
pub use local::{FileLocalStore, LocalStore, MemoryLocalStore, LOCAL_STORE_KEY};
pub use poller::{
    spawn_poller, PollerHandle, SharedSession, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL,
};
pub use seed::{BundledSeed, FileSeed, SeedSource};
pub use session::{CardForm, SyncMode, SyncSession, ID_FLOOR};
pub use view::{BoardView, ColumnView};
