//! Operation traits and execution results
//!
//! Operations are structs where the fields ARE the parameters. Each one names
//! itself with a verb/noun pair and executes against a context:
//!
//! ```ignore
//! #[async_trait]
//! impl Execute<BoardContext, BoardError> for AddCard {
//!     type Output = Card;
//!     async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Card, BoardError> {
//!         // returns ExecutionResult::Logged for mutations, Unlogged for reads
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use async_trait::async_trait;

/// Metadata every operation carries
pub trait Operation {
    /// Verb, e.g. "add"
    fn verb(&self) -> &'static str;

    /// Noun, e.g. "card"
    fn noun(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Canonical op string, e.g. "add card"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run an operation against a context
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
{
    type Output: Send;

    async fn execute(&self, ctx: &C) -> ExecutionResult<Self::Output, E>;
}

/// Implement [`Operation`] for a command struct
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}
pub(crate) use operation;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: Operations that mutate state and should be audited
/// - Unlogged: Read-only operations with no side effects
/// - Failed: Errors (optionally logged)
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

/// A record of one mutating operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ULID
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Canonical op string (e.g., "add card")
    pub op: String,
    pub input: Value,
    /// The result value or error
    pub output: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub duration_ms: u64,
}

impl LogEntry {
    pub fn new(op: impl Into<String>, input: Value, output: Value, duration_ms: u64) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor: None,
            duration_ms,
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Wrap the outcome of a mutating operation with a log entry.
///
/// Shared by every mutating command so they all log the same shape.
pub(crate) fn logged<T, E>(
    op: String,
    input: Value,
    result: Result<T, E>,
    started: std::time::Instant,
) -> ExecutionResult<T, E>
where
    T: Serialize,
    E: std::fmt::Display,
{
    let duration_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(value) => {
            let output = serde_json::to_value(&value).unwrap_or(Value::Null);
            ExecutionResult::Logged {
                value,
                log_entry: LogEntry::new(op, input, output, duration_ms),
            }
        }
        Err(error) => {
            let output = serde_json::json!({ "error": error.to_string() });
            ExecutionResult::Failed {
                log_entry: Some(LogEntry::new(op, input, output, duration_ms)),
                error,
            }
        }
    }
}

/// Wrap the outcome of a read-only operation
pub(crate) fn unlogged<T, E>(result: Result<T, E>) -> ExecutionResult<T, E> {
    match result {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}
