//! UpdateCard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, logged, operation, Execute, ExecutionResult, Operation};
use crate::types::{BoardDocument, Card, CardId, CardPatch, ColumnId, Priority};
use serde::{Deserialize, Serialize};

/// Update an existing card. Only the fields present in the patch change.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateCard {
    /// The card id to update
    pub id: CardId,
    #[serde(flatten)]
    pub patch: CardPatch,
}

operation!(
    UpdateCard,
    verb = "update",
    noun = "card",
    description = "Update card fields"
);

impl UpdateCard {
    /// Create an UpdateCard command with an empty patch
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            patch: CardPatch::default(),
        }
    }

    /// Create an UpdateCard command from an existing patch
    pub fn with_patch(id: impl Into<CardId>, patch: CardPatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }

    /// Move the card to another column (the drag-and-drop update)
    pub fn to_column(id: impl Into<CardId>, column: impl Into<ColumnId>) -> Self {
        Self::with_patch(id, CardPatch::new().with_column(column))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.patch.title = Some(title.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.patch.assignee = Some(assignee.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.patch.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.patch.priority = Some(priority);
        self
    }

    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.patch.column = Some(column.into());
        self
    }

    fn validate(&self, doc: &BoardDocument) -> Result<()> {
        if let Some(title) = &self.patch.title {
            if title.trim().is_empty() {
                return Err(BoardError::validation("title", "title must not be empty"));
            }
        }
        if let Some(column) = &self.patch.column {
            if !doc.has_column(column) {
                return Err(BoardError::validation(
                    "column",
                    format!("'{}' is not a board column", column),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateCard {
    type Output = Card;

    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Card, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            let _guard = ctx.write_lock().await;
            let mut doc = ctx.read_board().await?;

            if !doc.contains_card(&self.id) {
                return Err(BoardError::not_found(self.id.as_str()));
            }
            self.validate(&doc)?;

            let card = match doc.find_card_mut(&self.id) {
                Some(card) => {
                    self.patch.apply(card);
                    card.clone()
                }
                None => return Err(BoardError::not_found(self.id.as_str())),
            };

            ctx.write_board(&doc).await?;
            Ok(card)
        }
        .await;

        logged(self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::card::AddCard;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, BoardContext, Card) {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::from_path(temp.path().join("data.json"));
        InitBoard::new().execute(&ctx).await.into_result().unwrap();

        let card = AddCard::new("Original")
            .with_assignee("alice")
            .with_priority(Priority::High)
            .with_description("details")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        (temp, ctx, card)
    }

    #[tokio::test]
    async fn test_move_to_column_keeps_other_fields() {
        let (_temp, ctx, card) = setup().await;

        let updated = UpdateCard::to_column(card.id.clone(), "review")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(updated.column, "review");
        assert_eq!(updated.title, card.title);
        assert_eq!(updated.assignee, card.assignee);
        assert_eq!(updated.priority, card.priority);
        assert_eq!(updated.description, card.description);
    }

    #[tokio::test]
    async fn test_update_title_persists() {
        let (_temp, ctx, card) = setup().await;

        UpdateCard::new(card.id.clone())
            .with_title("Updated")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let doc = ctx.read_board().await.unwrap();
        assert_eq!(doc.find_card(&card.id).unwrap().title, "Updated");
    }

    #[tokio::test]
    async fn test_update_title_is_trimmed_like_add() {
        let (_temp, ctx, card) = setup().await;

        let added = AddCard::new("  Spaced  ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let updated = UpdateCard::new(card.id.clone())
            .with_title("  Spaced  ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(added.title, "Spaced");
        assert_eq!(updated.title, added.title);
        let doc = ctx.read_board().await.unwrap();
        assert_eq!(doc.find_card(&card.id).unwrap().title, "Spaced");
    }

    #[tokio::test]
    async fn test_empty_patch_is_noop() {
        let (_temp, ctx, card) = setup().await;

        let updated = UpdateCard::new(card.id.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(updated, card);
    }

    #[tokio::test]
    async fn test_update_missing_card() {
        let (_temp, ctx, _card) = setup().await;

        let result = UpdateCard::new("missing")
            .with_title("x")
            .execute(&ctx)
            .await
            .into_result();

        assert!(matches!(result, Err(BoardError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_empty_title_rejected() {
        let (_temp, ctx, card) = setup().await;

        let result = UpdateCard::new(card.id.clone())
            .with_title("  ")
            .execute(&ctx)
            .await
            .into_result();

        assert!(matches!(result, Err(BoardError::Validation { .. })));
        let doc = ctx.read_board().await.unwrap();
        assert_eq!(doc.find_card(&card.id).unwrap().title, "Original");
    }

    #[tokio::test]
    async fn test_update_invalid_column_rejected() {
        let (_temp, ctx, card) = setup().await;

        let result = UpdateCard::to_column(card.id.clone(), "archive")
            .execute(&ctx)
            .await
            .into_result();

        assert!(matches!(result, Err(BoardError::Validation { .. })));
        let doc = ctx.read_board().await.unwrap();
        assert_eq!(doc.find_card(&card.id).unwrap().column, "backlog");
    }

    #[test]
    fn test_deserialize_flattened_patch() {
        let cmd: UpdateCard =
            serde_json::from_str(r#"{"id":"abc","column":"review","priority":"low"}"#).unwrap();
        assert_eq!(cmd.id, "abc");
        assert_eq!(cmd.patch.column, Some(ColumnId::from("review")));
        assert_eq!(cmd.patch.priority, Some(Priority::Low));
        assert!(cmd.patch.title.is_none());
    }
}
