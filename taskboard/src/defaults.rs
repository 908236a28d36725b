//! Built-in default dataset.
//!
//! `default_board()` is the sample board shipped with the crate. It seeds new
//! documents on request and is the client's fallback when its local store is
//! empty.

use crate::error::Result;
use crate::types::BoardDocument;

/// Raw JSON of the bundled dataset
pub const DEFAULT_BOARD_JSON: &str = include_str!("../data/default_board.json");

/// Parse the bundled dataset
pub fn default_board() -> Result<BoardDocument> {
    Ok(serde_json::from_str(DEFAULT_BOARD_JSON)?)
}
