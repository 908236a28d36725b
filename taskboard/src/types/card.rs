//! Card types: Card, Priority, CardPatch

use super::ids::{CardId, ColumnId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Assignee recorded when a card is created without one
pub const UNASSIGNED: &str = "Unassigned";

fn default_assignee() -> String {
    UNASSIGNED.to_string()
}

/// Card priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority '{}' (expected low, medium or high)", other)),
        }
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default = "default_assignee")]
    pub assignee: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub column: ColumnId,
}

impl Card {
    /// Create a card with default assignee, description and priority
    pub fn new(id: impl Into<CardId>, title: impl Into<String>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            assignee: default_assignee(),
            description: String::new(),
            priority: Priority::default(),
            column: column.into(),
        }
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Case-insensitive assignee comparison
    pub fn is_assigned_to(&self, assignee: &str) -> bool {
        self.assignee.to_lowercase() == assignee.to_lowercase()
    }
}

/// Partial update of a card. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnId>,
}

impl CardPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
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

    /// Merge the present fields into `card`. Titles are stored trimmed.
    pub fn apply(&self, card: &mut Card) {
        if let Some(title) = &self.title {
            card.title = title.trim().to_string();
        }
        if let Some(assignee) = &self.assignee {
            card.assignee = assignee.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        if let Some(column) = &self.column {
            card.column = column.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_defaults_on_deserialize() {
        let card: Card =
            serde_json::from_str(r#"{"id":"1","title":"Write release notes","column":"backlog"}"#).unwrap();
        assert_eq!(card.assignee, UNASSIGNED);
        assert_eq!(card.description, "");
        assert_eq!(card.priority, Priority::Medium);
    }

    #[test]
    fn test_priority_wire_format() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!("LOW".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut card = Card::new("7", "Task", "backlog")
            .with_assignee("alice")
            .with_priority(Priority::High);

        CardPatch::new().with_column("review").apply(&mut card);

        assert_eq!(card.column, "review");
        assert_eq!(card.title, "Task");
        assert_eq!(card.assignee, "alice");
        assert_eq!(card.priority, Priority::High);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let original = Card::new("7", "Task", "backlog").with_description("details");
        let mut card = original.clone();

        CardPatch::new().apply(&mut card);

        assert_eq!(card, original);
    }

    #[test]
    fn test_patch_trims_title() {
        let mut card = Card::new("7", "Task", "backlog");

        CardPatch::new().with_title("  Spaced  ").apply(&mut card);

        assert_eq!(card.title, "Spaced");
    }

    #[test]
    fn test_patch_deserializes_subset() {
        let patch: CardPatch = serde_json::from_str(r#"{"column":"review"}"#).unwrap();
        assert_eq!(patch.column, Some(ColumnId::from("review")));
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_assignee_case_insensitive() {
        let card = Card::new("1", "Task", "backlog").with_assignee("alice");
        assert!(card.is_assigned_to("ALICE"));
        assert!(!card.is_assigned_to("bob"));
    }
}
