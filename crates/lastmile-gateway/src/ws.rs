//! `WebSocket` handler for viewer sessions.
//!
//! Viewers connect to `GET /ws/track` and receive a JSON-encoded
//! [`TrackingEvent`] text frame for every state change the tracker
//! broadcasts. The handler uses a [`broadcast::Receiver`](tokio::sync::broadcast)
//! so all connected viewers see the same stream.
//!
//! A viewer that wants the current state (typically right after
//! connecting) sends `{"event": "requestInitialData"}`; the session
//! replies on this socket only with one `initialRoute` frame per tracked
//! order. If a viewer falls behind, lagged messages are silently skipped
//! and the viewer resumes from the most recent event; the next replay
//! request reconciles whatever was missed.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use lastmile_types::{TrackingEvent, ViewerId, ViewerRequest};
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming tracking events.
///
/// # Route
///
/// `GET /ws/track`
pub async fn ws_track(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_session(socket, state))
}

/// Handle the viewer session lifecycle: subscribe to the broadcast
/// channel, forward each tracking event as a text frame, and answer
/// replay requests.
async fn handle_session(mut socket: WebSocket, state: Arc<AppState>) {
    let viewer = ViewerId::new();
    debug!(%viewer, "viewer connected");

    let mut rx = state.subscribe();

    loop {
        tokio::select! {
            // Receive a tracking event from the hub.
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            debug!(%viewer, "viewer disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(%viewer, skipped = n, "viewer lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!(%viewer, "broadcast channel closed, ending session");
                        return;
                    }
                }
            }
            // Handle traffic from the viewer itself.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ViewerRequest>(&text) {
                            Ok(ViewerRequest::RequestInitialData) => {
                                if replay_to(&mut socket, &state, viewer).await.is_err() {
                                    debug!(%viewer, "viewer disconnected during replay");
                                    return;
                                }
                            }
                            Err(error) => {
                                debug!(%viewer, %error, "ignoring unrecognized viewer message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%viewer, "viewer disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!(%viewer, "viewer disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(error)) => {
                        debug!(%viewer, %error, "websocket error");
                        return;
                    }
                    _ => {
                        // Ignore binary frames and pongs.
                    }
                }
            }
        }
    }
}

/// Send the current store contents to this viewer only, each record as
/// an `initialRoute` event.
async fn replay_to(
    socket: &mut WebSocket,
    state: &AppState,
    viewer: ViewerId,
) -> Result<(), axum::Error> {
    let events = state.tracker.replay().await;
    debug!(%viewer, count = events.len(), "replaying current state");
    for event in &events {
        send_event(socket, event).await?;
    }
    Ok(())
}

/// Serialize one tracking event and write it as a text frame.
///
/// Serialization failures are logged and swallowed; a single
/// unserializable event must not tear down the session.
async fn send_event(socket: &mut WebSocket, event: &TrackingEvent) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(error) => {
            warn!(%error, event = event.name(), "failed to serialize tracking event");
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}
