//! InitBoard command

use crate::context::BoardContext;
use crate::defaults::default_board;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, logged, operation, Execute, ExecutionResult, Operation};
use crate::types::{BoardDocument, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Create a new board document
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InitBoard {
    /// Column ids in display order; the default set when omitted
    pub columns: Option<Vec<ColumnId>>,
    /// Include the bundled sample cards
    #[serde(default)]
    pub with_samples: bool,
}

operation!(
    InitBoard,
    verb = "init",
    noun = "board",
    description = "Create a new board document"
);

impl InitBoard {
    /// Create a new InitBoard command with the default columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom columns
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnId>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Seed the board with the bundled sample cards
    pub fn with_samples(mut self) -> Self {
        self.with_samples = true;
        self
    }

    fn build(&self) -> Result<BoardDocument> {
        let columns = match &self.columns {
            Some(columns) => {
                if columns.is_empty() {
                    return Err(BoardError::validation("columns", "at least one column is required"));
                }
                let mut seen = HashSet::new();
                for column in columns {
                    if column.as_str().trim().is_empty() {
                        return Err(BoardError::validation("columns", "column ids must not be empty"));
                    }
                    if !seen.insert(column) {
                        return Err(BoardError::validation(
                            "columns",
                            format!("duplicate column '{}'", column),
                        ));
                    }
                }
                columns.clone()
            }
            None => BoardDocument::default_columns(),
        };

        let mut doc = BoardDocument::new(columns);
        if self.with_samples {
            let samples = default_board()?;
            // Only samples that fit the chosen columns
            doc.cards = samples
                .cards
                .into_iter()
                .filter(|c| doc.has_column(&c.column))
                .collect();
        }
        Ok(doc)
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for InitBoard {
    type Output = BoardDocument;

    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<BoardDocument, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            let _guard = ctx.write_lock().await;

            if ctx.is_initialized().await {
                return Err(BoardError::AlreadyExists {
                    location: ctx.store().describe(),
                });
            }

            let doc = self.build()?;
            ctx.write_board(&doc).await?;
            Ok(doc)
        }
        .await;

        logged(self.op_string(), input, result, start)
    }
}
