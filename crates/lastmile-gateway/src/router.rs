//! Axum router construction for the gateway.
//!
//! Assembles all routes (webhook + REST + `WebSocket`) into a single
//! [`Router`] with CORS middleware for cross-origin dashboard access and
//! a cache-control layer: tracking responses must never be cached by the
//! browser, or a reloaded dashboard would render stale positions.

use std::sync::Arc;

use axum::http::header::{self, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::webhook;
use crate::ws;

/// Build the complete Axum router for the gateway server.
///
/// The router includes:
/// - `POST /eventgrid` -- webhook ingestion (location events, handshake)
/// - `POST /reset` -- remove one order's tracked state
/// - `POST /reset-all` -- remove all tracked state
/// - `GET /ws/track` -- `WebSocket` tracking event stream
/// - `GET /` -- minimal HTML status page
/// - `GET /api/orders` -- list tracked orders
/// - `GET /api/orders/:id` -- single tracked order
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let no_store = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, private"),
    );

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Webhook ingestion
        .route("/eventgrid", post(webhook::receive_events))
        .route("/reset", post(webhook::reset_order))
        .route("/reset-all", post(webhook::reset_all))
        // WebSocket
        .route("/ws/track", get(ws::ws_track))
        // REST API
        .route("/api/orders", get(handlers::list_orders))
        .route("/api/orders/{id}", get(handlers::get_order))
        .layer(no_store)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
