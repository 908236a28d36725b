//! Periodic refresh of a remote session

use crate::session::SyncSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Default refresh interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Shorter intervals are raised to this
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A session shared between the caller and the poller
pub type SharedSession = Arc<Mutex<SyncSession>>;

/// Handle to a running poller.
///
/// The revision channel ticks every time a refresh changed the session's
/// cards. Dropping the handle stops the poller.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: CancellationToken,
    revisions: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// A receiver notified on each change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revisions.clone()
    }

    /// Number of refreshes that changed the board so far
    pub fn revision(&self) -> u64 {
        *self.revisions.borrow()
    }

    /// Stop polling and wait for the task to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Err(e) = (&mut self.task).await {
            tracing::warn!("poller task ended abnormally: {}", e);
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start refreshing `session` every `interval`.
///
/// Returns `None` for a local session, which has nothing to poll. The
/// interval is clamped to [`MIN_POLL_INTERVAL`].
pub async fn spawn_poller(session: SharedSession, interval: Duration) -> Option<PollerHandle> {
    let interval = interval.max(MIN_POLL_INTERVAL);
    if !session.lock().await.is_remote() {
        tracing::debug!("local session, not polling");
        return None;
    }

    let cancel = CancellationToken::new();
    let (tx, rx) = watch::channel(0u64);
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let changed = session.lock().await.refresh().await;
            match changed {
                Ok(true) => {
                    tx.send_modify(|rev| *rev += 1);
                    tracing::debug!(revision = *tx.borrow(), "board refreshed");
                }
                Ok(false) => {}
                Err(e) => tracing::warn!("refresh failed: {}", e),
            }
        }
        tracing::debug!("poller stopped");
    });

    tracing::debug!(interval_ms = interval.as_millis() as u64, "poller started");
    Some(PollerHandle {
        cancel,
        revisions: rx,
        task,
    })
}
