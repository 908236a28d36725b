//! Core types for the task board

mod board;
mod card;
mod ids;

pub use board::{BoardDocument, BoardListing, CardFilter, DEFAULT_COLUMNS};
pub use card::{Card, CardPatch, Priority, UNASSIGNED};
pub use ids::{CardId, ColumnId};
