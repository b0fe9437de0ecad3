//! Gateway startup helper for embedding in the relay binary.
//!
//! Provides [`spawn_gateway`] which launches the HTTP + `WebSocket`
//! server on a background Tokio task. The relay binary calls this during
//! startup so the gateway runs concurrently with signal handling.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the gateway server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the gateway HTTP server on a background Tokio task.
///
/// Binds to the configured address and serves the webhook, REST, and
/// `WebSocket` endpoints. Returns a [`JoinHandle`] so the caller can
/// manage the server's lifecycle alongside its own shutdown logic.
///
/// The server runs until the Tokio runtime is shut down or the task is
/// aborted. The caller should hold the returned handle and abort or
/// await it during clean shutdown.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured bind address is
/// not parseable. This is checked eagerly before the background task is
/// spawned; bind failures on a valid address surface as a logged error
/// from the task itself.
pub async fn spawn_gateway(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task; the actual bind happens inside start_server.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!(
            "invalid address {addr_str}: {e}"
        )))
    })?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "gateway server exited with error");
        }
    });

    tracing::info!(addr = addr_str, "gateway server spawned on background task");

    Ok(handle)
}
