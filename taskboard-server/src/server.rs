//! Binding and running the HTTP server

use crate::routes::router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use taskboard::BoardContext;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::services::ServeDir;

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Errors starting the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid bind address '{addr}': {message}")]
    InvalidAddress { addr: String, message: String },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and how to serve the API
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// `0` lets the OS pick a free port
    pub port: u16,
    /// Front-end files served for any path the API does not handle
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Loopback on a random free port
    pub fn ephemeral() -> Self {
        Self {
            port: 0,
            ..Self::default()
        }
    }
}

/// Handle to a running server
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// The bound address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL, e.g. `http://127.0.0.1:3000`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!("server task ended abnormally: {}", e);
        }
    }

}

/// Start the HTTP server for `ctx`.
///
/// Returns once the listener is bound; requests are served on a background
/// task until [`ServerHandle::shutdown`] is called.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard::BoardContext;
/// use taskboard_server::{start_server, ServerConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ctx = Arc::new(BoardContext::from_path("data.json"));
/// let handle = start_server(ctx, ServerConfig::ephemeral()).await?;
/// println!("listening on {}", handle.url());
/// handle.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(
    ctx: Arc<BoardContext>,
    config: ServerConfig,
) -> Result<ServerHandle, ServerError> {
    let bind_addr = format!("{}:{}", config.host, config.port);
    let candidates: Vec<SocketAddr> = tokio::net::lookup_host((config.host.as_str(), config.port))
        .await
        .map_err(|e| ServerError::InvalidAddress {
            addr: bind_addr.clone(),
            message: e.to_string(),
        })?
        .collect();
    if candidates.is_empty() {
        return Err(ServerError::InvalidAddress {
            addr: bind_addr,
            message: "host resolved to no addresses".to_string(),
        });
    }

    tracing::debug!(store = %ctx.store().describe(), "binding to {}", bind_addr);

    let listener = TcpListener::bind(candidates.as_slice())
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;
    let addr = listener.local_addr()?;

    let mut app = router(ctx);
    if let Some(dir) = &config.static_dir {
        tracing::info!("serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tracing::info!("task board server listening on http://{}", addr);

    let task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;

        match result {
            Ok(()) => tracing::info!("task board server stopped"),
            Err(e) => tracing::error!("task board server error: {}", e),
        }
    });

    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard::MemoryStore;

    #[tokio::test]
    async fn test_start_server_with_random_port() {
        let ctx = Arc::new(BoardContext::new(Arc::new(MemoryStore::new())));

        let handle = start_server(ctx, ServerConfig::ephemeral()).await.unwrap();

        assert!(handle.port() > 0);
        assert!(handle.url().starts_with("http://127.0.0.1:"));
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_invalid_host_rejected() {
        let ctx = Arc::new(BoardContext::new(Arc::new(MemoryStore::new())));
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::ephemeral()
        };

        let result = start_server(ctx, config).await;
        assert!(matches!(result, Err(ServerError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn test_hostname_is_resolved() {
        let ctx = Arc::new(BoardContext::new(Arc::new(MemoryStore::new())));
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..ServerConfig::ephemeral()
        };

        let handle = start_server(ctx, config).await.unwrap();
        assert!(handle.addr().ip().is_loopback());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_ipv6_literal_is_accepted() {
        let ctx = Arc::new(BoardContext::new(Arc::new(MemoryStore::new())));
        let config = ServerConfig {
            host: "::1".to_string(),
            ..ServerConfig::ephemeral()
        };

        // Hosts without IPv6 fail at bind time, never at address parsing
        match start_server(ctx, config).await {
            Ok(handle) => {
                assert!(handle.url().starts_with("http://[::1]:"));
                handle.shutdown().await;
            }
            Err(e) => assert!(matches!(e, ServerError::Bind { .. }), "{}", e),
        }
    }
}
