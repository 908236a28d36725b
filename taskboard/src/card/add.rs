//! AddCard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, logged, operation, Execute, ExecutionResult, Operation};
use crate::types::{BoardDocument, Card, CardId, ColumnId, Priority, UNASSIGNED};
use serde::{Deserialize, Serialize};

/// Add a new card to the board
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddCard {
    /// The card title (required, non-empty)
    #[serde(default)]
    pub title: String,
    /// Assignee; "Unassigned" when omitted or blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to medium
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Must be one of the board's columns; defaults to the first column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
}

operation!(
    AddCard,
    verb = "add",
    noun = "card",
    description = "Create a new card on the board"
);

impl AddCard {
    /// Create a new AddCard command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Build the card to insert into `doc`, validating against its columns
    fn build(&self, doc: &BoardDocument) -> Result<Card> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(BoardError::validation("title", "title is required"));
        }

        let column = match &self.column {
            Some(column) if !doc.has_column(column) => {
                return Err(BoardError::validation(
                    "column",
                    format!("'{}' is not a board column", column),
                ));
            }
            Some(column) => column.clone(),
            None => doc
                .first_column()
                .cloned()
                .ok_or_else(|| BoardError::validation("column", "board has no columns"))?,
        };

        let assignee = match self.assignee.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => UNASSIGNED.to_string(),
        };

        Ok(Card {
            id: fresh_id(doc),
            title: title.to_string(),
            assignee,
            description: self.description.clone().unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            column,
        })
    }
}

/// A random id not used by any card in `doc`
fn fresh_id(doc: &BoardDocument) -> CardId {
    loop {
        let id = CardId::generate();
        if !doc.contains_card(&id) {
            return id;
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddCard {
    type Output = Card;

    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Card, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            let _guard = ctx.write_lock().await;
            let mut doc = ctx.read_board().await?;

            let card = self.build(&doc)?;
            doc.cards.push(card.clone());

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
    use tempfile::TempDir;

    async fn setup() -> (TempDir, BoardContext) {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::from_path(temp.path().join("data.json"));

        InitBoard::new().execute(&ctx).await.into_result().unwrap();

        (temp, ctx)
    }

    #[tokio::test]
    async fn test_add_card_defaults() {
        let (_temp, ctx) = setup().await;

        let card = AddCard::new("Write release notes")
            .with_column("backlog")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(card.title, "Write release notes");
        assert_eq!(card.priority, Priority::Medium);
        assert_eq!(card.assignee, "Unassigned");
        assert_eq!(card.description, "");
        assert_eq!(card.column, "backlog");
    }

    #[tokio::test]
    async fn test_add_card_defaults_to_first_column() {
        let (_temp, ctx) = setup().await;

        let card = AddCard::new("Task").execute(&ctx).await.into_result().unwrap();

        assert_eq!(card.column, "backlog");
    }

    #[tokio::test]
    async fn test_add_card_persists() {
        let (_temp, ctx) = setup().await;

        let card = AddCard::new("Task")
            .with_assignee("alice")
            .with_priority(Priority::High)
            .with_description("details")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let doc = ctx.read_board().await.unwrap();
        assert_eq!(doc.find_card(&card.id), Some(&card));
    }

    #[tokio::test]
    async fn test_add_card_unique_ids() {
        let (_temp, ctx) = setup().await;

        let mut ids = std::collections::HashSet::new();
        for i in 0..20 {
            let card = AddCard::new(format!("Task {}", i))
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            assert!(ids.insert(card.id));
        }
    }

    #[tokio::test]
    async fn test_add_card_empty_title_rejected() {
        let (_temp, ctx) = setup().await;
        let before = ctx.read_board().await.unwrap();

        for title in ["", "   "] {
            let result = AddCard::new(title).execute(&ctx).await.into_result();
            assert!(matches!(result, Err(BoardError::Validation { .. })));
        }

        assert_eq!(ctx.read_board().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_add_card_invalid_column_rejected() {
        let (_temp, ctx) = setup().await;

        let result = AddCard::new("Task")
            .with_column("nonexistent")
            .execute(&ctx)
            .await
            .into_result();

        assert!(matches!(result, Err(BoardError::Validation { ref field, .. }) if field == "column"));
        assert!(ctx.read_board().await.unwrap().cards.is_empty());
    }

    #[tokio::test]
    async fn test_add_card_blank_assignee_is_unassigned() {
        let (_temp, ctx) = setup().await;

        let card = AddCard::new("Task")
            .with_assignee("  ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(card.assignee, UNASSIGNED);
    }

    #[test]
    fn test_missing_title_deserializes_empty() {
        let cmd: AddCard = serde_json::from_str(r#"{"column":"done"}"#).unwrap();
        assert!(cmd.title.is_empty());
    }
}
