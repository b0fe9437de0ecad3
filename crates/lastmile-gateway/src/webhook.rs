//! Webhook ingestion endpoints.
//!
//! `POST /eventgrid` receives Event-Grid-style envelopes from the
//! upstream dispatch pipeline: either a single envelope or a batch
//! array. The endpoint answers the subscription-validation handshake,
//! feeds `SendingCoordinates` events into the tracker, and drops
//! everything else with a log line. Per-event failures never fail the
//! request: one malformed event in a batch must not take down its
//! neighbours, and the sender retries nothing either way.
//!
//! `POST /reset` and `POST /reset-all` are operator endpoints that clear
//! one order or the whole store.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use lastmile_tracker::TrackerError;
use lastmile_types::{LocationEvent, OrderId};
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::state::AppState;

/// Envelope type carrying driver coordinates.
pub const EVENT_TYPE_LOCATION: &str = "SendingCoordinates";

/// Envelope type of the Event Grid subscription handshake.
pub const EVENT_TYPE_SUBSCRIPTION_VALIDATION: &str =
    "Microsoft.EventGrid.SubscriptionValidationEvent";

/// One Event-Grid-style envelope.
///
/// Only `eventType` and `data` matter to the relay; id, timestamp, and
/// data version are logged for traceability and otherwise ignored.
#[derive(Debug, serde::Deserialize)]
pub struct Envelope {
    /// Sender-assigned event id.
    #[serde(default)]
    pub id: Option<String>,
    /// Discriminator for the payload in `data`.
    #[serde(default, rename = "eventType")]
    pub event_type: Option<String>,
    /// Event payload, shape depending on `eventType`.
    #[serde(default)]
    pub data: serde_json::Value,
    /// When the sender produced the event.
    #[serde(default, rename = "eventTime")]
    pub event_time: Option<DateTime<Utc>>,
    /// Envelope schema version declared by the sender.
    #[serde(default, rename = "dataVersion")]
    pub data_version: Option<String>,
}

/// A webhook body: Event Grid posts arrays, manual senders post single
/// envelopes. Both are accepted.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum EnvelopeBatch {
    /// A batch of envelopes.
    Many(Vec<Envelope>),
    /// A single bare envelope.
    One(Box<Envelope>),
}

impl EnvelopeBatch {
    fn into_vec(self) -> Vec<Envelope> {
        match self {
            Self::Many(envelopes) => envelopes,
            Self::One(envelope) => vec![*envelope],
        }
    }
}

/// Body of a `POST /reset` request.
#[derive(Debug, serde::Deserialize)]
pub struct ResetRequest {
    /// The order whose tracked state should be removed.
    #[serde(default)]
    pub order_id: Option<String>,
}

/// Handle `POST /eventgrid`.
///
/// The subscription-validation handshake is answered immediately with
/// the echoed validation code; Event Grid sends it as the only envelope
/// of the batch, so only the first envelope is checked. Every other
/// envelope is processed independently: core-detected errors
/// (validation, unknown kind, version mismatch) are logged and dropped,
/// and the endpoint still returns `200 OK` so the sender does not
/// re-deliver a batch the relay can never use.
pub async fn receive_events(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<EnvelopeBatch>,
) -> Response {
    let envelopes = batch.into_vec();

    if let Some(first) = envelopes.first()
        && first.event_type.as_deref() == Some(EVENT_TYPE_SUBSCRIPTION_VALIDATION)
    {
        return match first.data.get("validationCode").and_then(|v| v.as_str()) {
            Some(code) => {
                info!("answering Event Grid subscription validation");
                Json(serde_json::json!({ "validationResponse": code })).into_response()
            }
            None => GatewayError::InvalidBody("validationCode missing".to_string())
                .into_response(),
        };
    }

    for envelope in envelopes {
        if let Err(error) = process_envelope(&state, &envelope).await {
            warn!(
                event_id = envelope.id.as_deref().unwrap_or("<none>"),
                event_type = envelope.event_type.as_deref().unwrap_or("<missing>"),
                %error,
                "inbound event dropped"
            );
        }
    }

    StatusCode::OK.into_response()
}

/// Route one envelope into the tracker.
async fn process_envelope(state: &AppState, envelope: &Envelope) -> Result<(), TrackerError> {
    match envelope.event_type.as_deref() {
        Some(EVENT_TYPE_LOCATION) => {
            let event: LocationEvent =
                serde_json::from_value(envelope.data.clone()).map_err(|e| {
                    TrackerError::Validation(format!("malformed SendingCoordinates data: {e}"))
                })?;
            let outcome = state.tracker.ingest_location(&event).await?;
            debug!(
                order_id = %outcome.record.order_id,
                created = outcome.created,
                event_time = ?envelope.event_time,
                data_version = envelope.data_version.as_deref().unwrap_or("<none>"),
                "location event stored"
            );
            Ok(())
        }
        other => Err(TrackerError::UnknownEventKind(
            other.unwrap_or("<missing>").to_string(),
        )),
    }
}

/// Handle `POST /reset`: remove one order's tracked state.
///
/// Returns `400` when the body has no `order_id`. Resetting an order
/// that is not tracked is still `200`; the operation is idempotent.
pub async fn reset_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResetRequest>,
) -> Response {
    let Some(order_id) = request.order_id else {
        return GatewayError::InvalidBody("missing order_id in request body".to_string())
            .into_response();
    };

    let order_id = OrderId::new(order_id);
    let removed = state.tracker.reset_order(&order_id).await;
    info!(%order_id, removed, "reset request processed");

    StatusCode::OK.into_response()
}

/// Handle `POST /reset-all`: clear the entire store.
pub async fn reset_all(State(state): State<Arc<AppState>>) -> StatusCode {
    state.tracker.reset_all().await;
    info!("reset-all request processed");
    StatusCode::OK
}
