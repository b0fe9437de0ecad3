//! Relay binary for the Lastmile tracking system.
//!
//! This is the main entry point that wires together the order tracker
//! (store + notification hub) and the gateway server. It loads
//! configuration, initializes both subsystems, and runs until a
//! shutdown signal is received.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `lastmile-relay.yaml`
//! 3. Create the order tracker
//! 4. Start the gateway HTTP + `WebSocket` server
//! 5. Wait for `Ctrl-C`
//! 6. Stop the gateway and exit

mod error;

use std::path::Path;
use std::sync::Arc;

use lastmile_gateway::{spawn_gateway, AppState, ServerConfig};
use lastmile_tracker::{OrderTracker, RelayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::RelayError;

/// Default location of the YAML configuration file.
const CONFIG_PATH: &str = "lastmile-relay.yaml";

/// Application entry point for the relay.
///
/// Initializes all subsystems and serves until terminated.
///
/// # Errors
///
/// Returns an error if configuration loading or gateway startup fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("lastmile-relay starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        broadcast_capacity = config.channel.broadcast_capacity,
        "configuration loaded"
    );

    // 3. Create the order tracker. The store starts empty: tracked
    //    state lives and dies with the process, and the upstream
    //    provider repopulates it with the next location events.
    let tracker = Arc::new(OrderTracker::new(config.channel.broadcast_capacity));
    info!("order tracker initialized");

    // 4. Start the gateway server.
    let state = Arc::new(AppState::new(Arc::clone(&tracker)));
    let gateway_handle = spawn_gateway(ServerConfig::from(&config.server), state)
        .await
        .map_err(|e| RelayError::Gateway {
            message: format!("{e}"),
        })?;
    info!("gateway started");

    // 5. Run until interrupted.
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| RelayError::Signal {
            message: format!("{e}"),
        })?;
    info!("shutdown signal received");

    // 6. Stop the gateway.
    gateway_handle.abort();
    info!("lastmile-relay stopped");

    Ok(())
}

/// Load the relay configuration from [`CONFIG_PATH`].
///
/// A missing file is not an error; defaults apply.
fn load_config() -> Result<RelayConfig, RelayError> {
    Ok(RelayConfig::load(Path::new(CONFIG_PATH))?)
}
