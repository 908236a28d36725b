use crate::render;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use taskboard_client::{spawn_poller, SyncSession};
use tokio::sync::Mutex;

/// Print the board, then reprint it whenever a refresh changes it
pub async fn run(mut session: SyncSession, interval: Duration) -> anyhow::Result<()> {
    session.load().await.context("failed to load cards")?;
    println!("{}", render::board(&session.view()));

    let session = Arc::new(Mutex::new(session));
    let Some(poller) = spawn_poller(session.clone(), interval).await else {
        println!("Server unavailable; showing the local board without refresh.");
        return Ok(());
    };
    let mut revisions = poller.subscribe();

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl+C")?;
                break;
            }
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = session.lock().await.view();
                println!("{}", render::board(&view));
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}
