//! REST endpoint handlers for the gateway server.
//!
//! All handlers read from the in-memory order-state store via the shared
//! [`AppState`]. The map dashboard uses the `WebSocket` stream; these
//! endpoints exist for operators and smoke tests.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/orders` | List tracked orders |
//! | `GET` | `/api/orders/:id` | Get one tracked order |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::Utc;
use lastmile_types::OrderId;

use crate::error::GatewayError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing relay status and API links.
///
/// The production map dashboard is a separate static frontend; this page
/// is for checking that the relay is up and how much it is tracking.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tracked = state.tracker.store().len().await;
    let viewers = state.tracker.hub().viewer_count();
    let uptime = Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Lastmile Relay</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Lastmile Relay</h1>
    <p class="subtitle">Driver-location relay for live order tracking</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Tracked orders</div>
            <div class="value">{tracked}</div>
        </div>
        <div class="metric">
            <div class="label">Viewers</div>
            <div class="value">{viewers}</div>
        </div>
        <div class="metric">
            <div class="label">Uptime (s)</div>
            <div class="value">{uptime}</div>
        </div>
    </div>

    <hr>

    <h2>Endpoints</h2>
    <ul>
        <li>POST /eventgrid -- webhook ingestion (location events, handshake)</li>
        <li>POST /reset -- remove one order's tracked state</li>
        <li>POST /reset-all -- remove all tracked state</li>
        <li>GET <a href="/api/orders">/api/orders</a> -- list tracked orders</li>
        <li>GET /api/orders/:id -- single tracked order</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/track</code> -- live tracking event stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/orders -- list tracked orders
// ---------------------------------------------------------------------------

/// List every currently tracked order record.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, GatewayError> {
    let orders = state.tracker.store().snapshot_all().await;

    Ok(Json(serde_json::json!({
        "count": orders.len(),
        "orders": orders,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/orders/:id -- single tracked order
// ---------------------------------------------------------------------------

/// Return the latest known record for one order.
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let order_id = OrderId::new(id);

    let record = state
        .tracker
        .store()
        .get(&order_id)
        .await
        .ok_or_else(|| GatewayError::NotFound(format!("order {order_id}")))?;

    Ok(Json(serde_json::to_value(record)?))
}
