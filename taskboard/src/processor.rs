//! Runs board operations and records the mutating ones

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{Execute, LogEntry};

/// Executes operations and emits one tracing event per logged operation
#[derive(Debug, Clone, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute logged operations to `actor` (e.g. "cli" or "http")
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Execute `op` against `ctx`, returning its output
    pub async fn process<O>(&self, op: &O, ctx: &BoardContext) -> Result<O::Output>
    where
        O: Execute<BoardContext, BoardError>,
    {
        let (result, entry) = op.execute(ctx).await.split();

        if let Some(entry) = entry {
            self.record(entry, result.is_ok());
        }

        if let Err(e) = &result {
            tracing::debug!(op = %op.op_string(), kind = e.kind(), "operation failed: {}", e);
        }

        result
    }

    fn record(&self, entry: LogEntry, succeeded: bool) {
        let entry = match &self.actor {
            Some(actor) => entry.with_actor(actor.clone()),
            None => entry,
        };

        if succeeded {
            tracing::info!(
                log_id = %entry.id,
                op = %entry.op,
                actor = entry.actor.as_deref().unwrap_or("-"),
                duration_ms = entry.duration_ms,
                "board updated"
            );
        } else {
            tracing::warn!(
                log_id = %entry.id,
                op = %entry.op,
                actor = entry.actor.as_deref().unwrap_or("-"),
                duration_ms = entry.duration_ms,
                output = %entry.output,
                "board update rejected"
            );
        }
    }
}
