//! The viewer-facing wire protocol.
//!
//! Every message on the tracking `WebSocket` is a JSON object with an
//! `event` discriminator and, for payload-carrying messages, a `data`
//! field. The event names (`initialRoute`, `routeUpdate`, `reset`,
//! `reset-all`, `requestInitialData`) are a compatibility contract with
//! the deployed map client and must not change.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::OrderId;
use crate::order::OrderRecord;

/// A state-change notification pushed to viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export, export_to = "bindings/")]
pub enum TrackingEvent {
    /// First sighting of an order: the viewer should create markers and
    /// draw the initial route.
    #[serde(rename = "initialRoute")]
    InitialRoute(OrderRecord),

    /// Subsequent sighting: the viewer moves the car marker and
    /// recomputes the route polyline.
    #[serde(rename = "routeUpdate")]
    RouteUpdate(OrderRecord),

    /// One order's tracked state was removed.
    #[serde(rename = "reset")]
    Reset(ResetNotice),

    /// All tracked state was removed; viewers clear the map.
    #[serde(rename = "reset-all")]
    ResetAll,
}

impl TrackingEvent {
    /// The wire-level event name, for log lines.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InitialRoute(_) => "initialRoute",
            Self::RouteUpdate(_) => "routeUpdate",
            Self::Reset(_) => "reset",
            Self::ResetAll => "reset-all",
        }
    }
}

/// Payload of a [`TrackingEvent::Reset`] notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResetNotice {
    /// The order whose state was removed.
    pub order_id: OrderId,
}

/// A request sent by a viewer over its `WebSocket` session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event")]
#[ts(export, export_to = "bindings/")]
pub enum ViewerRequest {
    /// Replay the current store contents to this viewer, each record as
    /// an `initialRoute` event. Sent once after connecting; harmless to
    /// repeat.
    #[serde(rename = "requestInitialData")]
    RequestInitialData,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geo::{DriverLocation, Position};
    use crate::order::SCHEMA_VERSION;

    fn record(id: &str) -> OrderRecord {
        OrderRecord {
            order_id: OrderId::new(id),
            driver_location: DriverLocation {
                current_location: Position {
                    longitude: 10.0,
                    latitude: 20.0,
                },
                destination: Position {
                    longitude: 30.0,
                    latitude: 40.0,
                },
            },
            version: SCHEMA_VERSION.to_string(),
        }
    }

    #[test]
    fn initial_route_wire_shape() {
        let json = serde_json::to_value(TrackingEvent::InitialRoute(record("A1"))).unwrap();
        assert_eq!(json["event"], "initialRoute");
        assert_eq!(json["data"]["order_id"], "A1");
        assert_eq!(json["data"]["version"], "1.1");
        assert_eq!(
            json["data"]["driverLocation"]["currentLocation"]["longitude"],
            10.0
        );
    }

    #[test]
    fn route_update_wire_shape() {
        let json = serde_json::to_value(TrackingEvent::RouteUpdate(record("A1"))).unwrap();
        assert_eq!(json["event"], "routeUpdate");
    }

    #[test]
    fn reset_wire_shape() {
        let event = TrackingEvent::Reset(ResetNotice {
            order_id: OrderId::new("A1"),
        });
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["event"], "reset");
        assert_eq!(json["data"]["order_id"], "A1");
    }

    #[test]
    fn reset_all_has_no_payload() {
        let json = serde_json::to_value(TrackingEvent::ResetAll).unwrap();
        assert_eq!(json["event"], "reset-all");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn viewer_request_parses() {
        let request: ViewerRequest =
            serde_json::from_str(r#"{"event": "requestInitialData"}"#).unwrap();
        assert_eq!(request, ViewerRequest::RequestInitialData);
    }

    #[test]
    fn unknown_viewer_request_is_an_error() {
        let result = serde_json::from_str::<ViewerRequest>(r#"{"event": "subscribe"}"#);
        assert!(result.is_err());
    }
}
