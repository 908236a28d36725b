//! Task board engine with JSON document storage
//!
//! This crate holds the card model and the CRUD operations of a small kanban
//! board. The whole board lives in one JSON document that is read, modified
//! in memory and rewritten in full on every mutation.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard::{BoardContext, board::InitBoard, card::AddCard, Execute};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = BoardContext::from_path("data.json");
//! InitBoard::new().execute(&ctx).await.into_result()?;
//!
//! let card = AddCard::new("Write release notes")
//!     .with_column("backlog")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! println!("Created card: {}", card.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Layout
//!
//! ```text
//! data.json
//! {
//!   "columns": ["backlog", "in-progress", "review", "done"],
//!   "cards":   [{ "id", "title", "assignee", "description", "priority", "column" }, ...]
//! }
//! ```
//!
//! ## Concurrency
//!
//! Mutations through one [`BoardContext`] are serialised by its write gate.
//! Two processes writing the same file are not coordinated: both
//! read-modify-write cycles run and the later save wins.

mod context;
pub mod defaults;
mod error;
mod operation;
mod processor;
pub mod storage;
pub mod types;

// Command modules
pub mod board;
pub mod card;

pub use context::BoardContext;
pub use defaults::{default_board, DEFAULT_BOARD_JSON};
pub use error::{BoardError, Result};
pub use operation::{async_trait, Execute, ExecutionResult, LogEntry, Operation};
pub use processor::BoardOperationProcessor;
pub use storage::{BoardStore, JsonFileStore, MemoryStore};

// Re-export commonly used types
pub use types::{
    BoardDocument, BoardListing, Card, CardFilter, CardId, CardPatch, ColumnId, Priority,
    DEFAULT_COLUMNS, UNASSIGNED,
};
