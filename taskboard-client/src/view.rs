//! Column grouping for rendering

use std::collections::HashMap;
use taskboard::{Card, ColumnId};

/// One lane of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub column: ColumnId,
    pub cards: Vec<Card>,
}

/// Cards grouped into columns in board order.
///
/// Cards whose column is not on the board are counted but not placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    counts: HashMap<ColumnId, usize>,
}

impl BoardView {
    pub fn build(columns: &[ColumnId], cards: &[Card]) -> Self {
        let mut lanes: Vec<ColumnView> = columns
            .iter()
            .map(|column| ColumnView {
                column: column.clone(),
                cards: Vec::new(),
            })
            .collect();
        let mut counts: HashMap<ColumnId, usize> =
            columns.iter().map(|c| (c.clone(), 0)).collect();

        for card in cards {
            *counts.entry(card.column.clone()).or_default() += 1;
            if let Some(lane) = lanes.iter_mut().find(|l| l.column == card.column) {
                lane.cards.push(card.clone());
            }
        }

        Self {
            columns: lanes,
            counts,
        }
    }

    /// Number of cards whose column is `column`, placed or not
    pub fn count(&self, column: &ColumnId) -> usize {
        self.counts.get(column).copied().unwrap_or(0)
    }

    pub fn column(&self, column: &ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|l| &l.column == column)
    }

    /// Cards placed in a lane
    pub fn placed(&self) -> usize {
        self.columns.iter().map(|l| l.cards.len()).sum()
    }

    /// All counted cards
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
