//! Gateway server for the Lastmile tracking relay.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Webhook endpoint** (`POST /eventgrid`) accepting Event-Grid-style
//!   envelopes from the upstream dispatch pipeline, including the
//!   subscription-validation handshake
//! - **Operator endpoints** (`POST /reset`, `POST /reset-all`) to drop
//!   one order's tracked state or all of it
//! - **`WebSocket` endpoint** (`GET /ws/track`) streaming
//!   [`TrackingEvent`](lastmile_types::TrackingEvent)s to map viewers,
//!   with per-viewer replay on request
//! - **REST endpoints** (`GET /api/orders[/:id]`) for reading the
//!   current snapshot
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! The gateway owns no state of its own: it holds an injected
//! [`OrderTracker`](lastmile_tracker::OrderTracker) and translates
//! transport envelopes into tracker calls. All responses carry
//! `Cache-Control: no-store` so browsers never render stale positions
//! from cache.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod webhook;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use startup::{spawn_gateway, StartupError};
pub use state::AppState;
