//! ListCards command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::operation::{async_trait, operation, unlogged, Execute, ExecutionResult};
use crate::types::{BoardListing, CardFilter, ColumnId};
use serde::Deserialize;

/// List cards, optionally filtered by column and/or assignee
#[derive(Debug, Default, Deserialize)]
pub struct ListCards {
    #[serde(flatten)]
    pub filter: CardFilter,
}

operation!(
    ListCards,
    verb = "list",
    noun = "cards",
    description = "List cards with optional column and assignee filters"
);

impl ListCards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: CardFilter) -> Self {
        Self { filter }
    }

    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.filter.column = Some(column.into());
        self
    }

    /// Case-insensitive assignee match
    pub fn assigned_to(mut self, assignee: impl Into<String>) -> Self {
        self.filter.assignee = Some(assignee.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListCards {
    type Output = BoardListing;

    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<BoardListing, BoardError> {
        let result = async {
            let doc = ctx.read_board().await?;
            let cards = doc
                .cards
                .into_iter()
                .filter(|c| self.filter.matches(c))
                .collect();
            Ok(BoardListing {
                columns: doc.columns,
                cards,
            })
        }
        .await;

        unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::card::AddCard;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, BoardContext) {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::from_path(temp.path().join("data.json"));
        InitBoard::new().execute(&ctx).await.into_result().unwrap();

        for (title, column, assignee) in [
            ("One", "backlog", "alice"),
            ("Two", "done", "bob"),
            ("Three", "done", "Alice"),
            ("Four", "review", "carol"),
        ] {
            AddCard::new(title)
                .with_column(column)
                .with_assignee(assignee)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }

        (temp, ctx)
    }

    fn titles(listing: &BoardListing) -> Vec<&str> {
        listing.cards.iter().map(|c| c.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_all_preserves_order() {
        let (_temp, ctx) = setup().await;

        let listing = ListCards::new().execute(&ctx).await.into_result().unwrap();

        assert_eq!(titles(&listing), vec!["One", "Two", "Three", "Four"]);
        assert_eq!(listing.columns.len(), 4);
    }

    #[tokio::test]
    async fn test_list_by_column() {
        let (_temp, ctx) = setup().await;

        let listing = ListCards::new()
            .in_column("done")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(listing.cards.len(), 2);
        assert!(listing.cards.iter().all(|c| c.column == "done"));
    }

    #[tokio::test]
    async fn test_list_by_assignee_case_insensitive() {
        let (_temp, ctx) = setup().await;

        let listing = ListCards::new()
            .assigned_to("ALICE")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(titles(&listing), vec!["One", "Three"]);
    }

    #[tokio::test]
    async fn test_list_combined_filters() {
        let (_temp, ctx) = setup().await;

        let listing = ListCards::new()
            .in_column("done")
            .assigned_to("alice")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(titles(&listing), vec!["Three"]);
    }
}
