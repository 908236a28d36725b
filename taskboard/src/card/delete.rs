//! DeleteCard command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::operation::{async_trait, logged, operation, Execute, ExecutionResult, Operation};
use crate::types::{Card, CardId};
use serde::{Deserialize, Serialize};

/// Delete a card, returning the removed card
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteCard {
    pub id: CardId,
}

operation!(
    DeleteCard,
    verb = "delete",
    noun = "card",
    description = "Delete a card from the board"
);

impl DeleteCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteCard {
    type Output = Card;

    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Card, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            let _guard = ctx.write_lock().await;
            let mut doc = ctx.read_board().await?;

            let removed = doc
                .remove_card(&self.id)
                .ok_or_else(|| BoardError::not_found(self.id.as_str()))?;

            ctx.write_board(&doc).await?;
            Ok(removed)
        }
        .await;

        logged(self.op_string(), input, result, start)
    }
}
