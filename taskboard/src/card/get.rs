//! GetCard command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::operation::{async_trait, operation, unlogged, Execute, ExecutionResult};
use crate::types::{Card, CardId};
use serde::Deserialize;

/// Get a card by id
#[derive(Debug, Deserialize)]
pub struct GetCard {
    pub id: CardId,
}

operation!(GetCard, verb = "get", noun = "card", description = "Retrieve a card by id");

impl GetCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetCard {
    type Output = Card;

    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Card, BoardError> {
        let result = async {
            let doc = ctx.read_board().await?;
            doc.find_card(&self.id)
                .cloned()
                .ok_or_else(|| BoardError::not_found(self.id.as_str()))
        }
        .await;

        unlogged(result)
    }
}
