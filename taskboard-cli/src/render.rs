//! Terminal output for cards and boards.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use taskboard::Card;
use taskboard_client::BoardView;

/// Create a table with the shared preset.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Truncate a string to `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// One row per card.
pub fn cards_table(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "No cards.".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Assignee", "Priority", "Column"]);
    for card in cards {
        table.add_row(vec![
            card.id.to_string(),
            truncate_str(&card.title, 48),
            card.assignee.clone(),
            card.priority.to_string(),
            card.column.to_string(),
        ]);
    }
    table.to_string()
}

/// A single card with its description.
pub fn card_detail(card: &Card) -> String {
    let mut out = format!(
        "{} [{}]\n  id:       {}\n  assignee: {}\n  priority: {}",
        card.title, card.column, card.id, card.assignee, card.priority
    );
    if !card.description.is_empty() {
        out.push_str(&format!("\n\n  {}", card.description));
    }
    out
}

/// Columns side by side with their counts in the header.
pub fn board(view: &BoardView) -> String {
    let mut table = new_table();
    table.set_header(
        view.columns
            .iter()
            .map(|lane| format!("{} ({})", lane.column, view.count(&lane.column)))
            .collect::<Vec<_>>(),
    );

    let depth = view.columns.iter().map(|l| l.cards.len()).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            view.columns
                .iter()
                .map(|lane| {
                    lane.cards
                        .get(row)
                        .map(|card| {
                            format!(
                                "{}\n{} · {} · #{}",
                                truncate_str(&card.title, 32),
                                card.assignee,
                                card.priority,
                                card.id
                            )
                        })
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}
