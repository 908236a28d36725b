use crate::render;
use anyhow::Context;
use serde_json::json;
use taskboard_client::SyncSession;

/// Render the session's cards grouped by column
pub async fn run(session: &mut SyncSession, as_json: bool) -> anyhow::Result<String> {
    session.load().await.context("failed to load cards")?;
    let view = session.view();

    if as_json {
        let columns: Vec<_> = view
            .columns
            .iter()
            .map(|lane| {
                json!({
                    "column": lane.column,
                    "count": view.count(&lane.column),
                    "cards": lane.cards,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&json!({
            "mode": session.mode().to_string(),
            "columns": columns,
        }))?);
    }

    Ok(format!("{}\n({} mode)", render::board(&view), session.mode()))
}
