use crate::config::Config;
use anyhow::Context;
use std::sync::Arc;
use taskboard::BoardContext;
use taskboard_server::{start_server, ServerConfig};

/// Run the HTTP API until Ctrl+C
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let ctx = Arc::new(BoardContext::from_path(&config.data_file));
    if !ctx.is_initialized().await {
        tracing::warn!(
            "{} does not exist; card requests will fail until `taskboard init` is run",
            config.data_file.display()
        );
    }

    let server_config = ServerConfig {
        host: config.host.clone(),
        port: config.port,
        static_dir: config.static_dir.clone(),
    };
    let handle = start_server(ctx, server_config)
        .await
        .context("failed to start server")?;

    println!("Task board running at {}", handle.url());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    tracing::info!("shutting down");
    handle.shutdown().await;
    Ok(())
}
