//! Board-level types: BoardDocument, BoardListing, CardFilter

use super::card::Card;
use super::ids::{CardId, ColumnId};
use serde::{Deserialize, Serialize};

/// Default column ids, in display order
pub const DEFAULT_COLUMNS: [&str; 4] = ["backlog", "in-progress", "review", "done"];

/// The persisted aggregate: ordered columns plus every card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDocument {
    pub columns: Vec<ColumnId>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl BoardDocument {
    /// Create an empty document with the given columns
    pub fn new(columns: Vec<ColumnId>) -> Self {
        Self {
            columns,
            cards: Vec::new(),
        }
    }

    /// Get the default columns for a new board
    pub fn default_columns() -> Vec<ColumnId> {
        DEFAULT_COLUMNS.iter().map(|c| ColumnId::from(*c)).collect()
    }

    /// First column; new cards land here by default
    pub fn first_column(&self) -> Option<&ColumnId> {
        self.columns.first()
    }

    pub fn has_column(&self, column: &ColumnId) -> bool {
        self.columns.contains(column)
    }

    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    pub fn find_card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| &c.id == id)
    }

    pub fn contains_card(&self, id: &CardId) -> bool {
        self.find_card(id).is_some()
    }

    /// Remove a card, returning it
    pub fn remove_card(&mut self, id: &CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| &c.id == id)?;
        Some(self.cards.remove(index))
    }
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new(Self::default_columns())
    }
}

/// Equality filters for listing cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
    /// Matched case-insensitively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        if let Some(column) = &self.column {
            if &card.column != column {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if !card.is_assigned_to(assignee) {
                return false;
            }
        }
        true
    }
}

/// Response shape of a card listing: the columns plus the matching cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardListing {
    pub columns: Vec<ColumnId>,
    pub cards: Vec<Card>,
}
