use crate::cli::{CardFields, CardsCommand};
use crate::render;
use anyhow::{anyhow, Context};
use taskboard::{CardFilter, CardId, ColumnId};
use taskboard_client::{CardForm, SyncSession};

/// Run a `cards` subcommand against a loaded session
pub async fn run(session: &mut SyncSession, command: CardsCommand) -> anyhow::Result<String> {
    session.load().await.context("failed to load cards")?;

    match command {
        CardsCommand::List {
            column,
            assignee,
            json,
        } => {
            let filter = CardFilter {
                column: column.map(ColumnId::from),
                assignee,
            };
            let cards: Vec<_> = session
                .cards()
                .iter()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect();
            if json {
                Ok(serde_json::to_string_pretty(&cards)?)
            } else {
                Ok(render::cards_table(&cards))
            }
        }

        CardsCommand::Show { id } => {
            let id = CardId::from(id);
            let card = session
                .card(&id)
                .ok_or_else(|| anyhow!("card not found: {}", id))?;
            Ok(render::card_detail(card))
        }

        CardsCommand::Add { title, fields } => {
            let form = apply_fields(CardForm::new(title), fields);
            match session.save_card(form).await? {
                Some(card) => Ok(format!("Created card {} in {}", card.id, card.column)),
                None => Ok("Nothing saved: title is empty".to_string()),
            }
        }

        CardsCommand::Update { id, title, fields } => {
            let id = CardId::from(id);
            let existing = session
                .card(&id)
                .ok_or_else(|| anyhow!("card not found: {}", id))?;
            let mut form = apply_fields(CardForm::edit(existing), fields);
            if let Some(title) = title {
                form = form.with_title(title);
            }
            match session.save_card(form).await? {
                Some(card) => Ok(format!("Updated card {}", card.id)),
                None => Ok("Nothing saved: title is empty".to_string()),
            }
        }

        CardsCommand::Move { id, column } => {
            let card = session.move_card(&CardId::from(id), column).await?;
            Ok(format!("Moved card {} to {}", card.id, card.column))
        }

        CardsCommand::Delete { id } => {
            let card = session.delete_card(&CardId::from(id)).await?;
            Ok(format!("Deleted card {} ({})", card.id, card.title))
        }
    }
}

fn apply_fields(mut form: CardForm, fields: CardFields) -> CardForm {
    if let Some(assignee) = fields.assignee {
        form = form.with_assignee(assignee);
    }
    if let Some(description) = fields.description {
        form = form.with_description(description);
    }
    if let Some(priority) = fields.priority {
        form = form.with_priority(priority);
    }
    if let Some(column) = fields.column {
        form = form.with_column(column);
    }
    form
}
