use crate::commands::CLI_ACTOR;
use crate::config::Config;
use anyhow::Context;
use taskboard::board::InitBoard;
use taskboard::{BoardContext, BoardOperationProcessor};

/// Write a new board document to the configured data file
pub async fn run(config: &Config, columns: Option<Vec<String>>, samples: bool) -> anyhow::Result<String> {
    let ctx = BoardContext::from_path(&config.data_file);

    let mut cmd = InitBoard::new();
    if let Some(columns) = columns {
        cmd = cmd.with_columns(columns);
    }
    if samples {
        cmd = cmd.with_samples();
    }

    let doc = BoardOperationProcessor::with_actor(CLI_ACTOR)
        .process(&cmd, &ctx)
        .await
        .with_context(|| format!("failed to initialize {}", config.data_file.display()))?;

    let columns: Vec<&str> = doc.columns.iter().map(|c| c.as_str()).collect();
    Ok(format!(
        "Initialized {} with columns [{}] and {} card(s)",
        config.data_file.display(),
        columns.join(", "),
        doc.cards.len()
    ))
}
