//! ReplaceCards command
//!
//! Bulk overwrite of the card collection, used by drag-and-drop and full-board
//! sync. Cards are taken as-is: no title or column checks.

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::operation::{async_trait, logged, operation, Execute, ExecutionResult, Operation};
use crate::types::Card;
use serde::{Deserialize, Serialize};

/// Replace every card on the board
#[derive(Debug, Deserialize, Serialize)]
pub struct ReplaceCards {
    pub cards: Vec<Card>,
}

operation!(
    ReplaceCards,
    verb = "replace",
    noun = "cards",
    description = "Replace the whole card collection"
);

impl ReplaceCards {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ReplaceCards {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<(), BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::json!({ "count": self.cards.len() });

        let result = async {
            let _guard = ctx.write_lock().await;
            let mut doc = ctx.read_board().await?;

            doc.cards = self.cards.clone();

            ctx.write_board(&doc).await
        }
        .await;

        logged(self.op_string(), input, result, start)
    }
}
