//! Coordinate types for driver positions and destinations.
//!
//! The upstream provider stringifies coordinates before they reach the
//! webhook (`"latitude": "40.06037"`), while test harnesses and newer
//! senders emit plain JSON numbers. The `Raw*` types accept both shapes
//! without judgement; the order-state store validates them into
//! [`Position`] / [`DriverLocation`] before anything is stored or
//! broadcast.
//!
//! Validation itself lives in the store so that an invalid pair can be
//! rejected atomically with the rest of the event. The types here only
//! answer "can this field be read as a finite number".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A coordinate field as it appears on the wire: a JSON number or a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    /// Plain JSON number.
    Number(f64),
    /// Stringified number, as sent by the upstream provider.
    Text(String),
}

impl CoordinateValue {
    /// Interpret the value as a finite `f64`.
    ///
    /// Returns `None` for non-numeric strings and for non-finite values
    /// (`NaN`, infinities), both of which must never enter the store.
    pub fn as_finite_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// An unvalidated coordinate pair from an inbound event.
///
/// Both fields are optional because the webhook must accept the payload
/// first and reject it as a unit; serde-level rejection would lose the
/// order id needed for the log line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Longitude, degrees east. Number or numeric string.
    #[serde(default)]
    pub longitude: Option<CoordinateValue>,
    /// Latitude, degrees north. Number or numeric string.
    #[serde(default)]
    pub latitude: Option<CoordinateValue>,
}

impl RawPosition {
    /// Build a raw pair from two plain numbers. Test and tooling helper.
    pub const fn from_f64(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(CoordinateValue::Number(longitude)),
            latitude: Some(CoordinateValue::Number(latitude)),
        }
    }
}

/// An unvalidated driver-location payload: where the driver is and where
/// the order is going.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDriverLocation {
    /// The driver's reported position.
    #[serde(default, rename = "currentLocation")]
    pub current_location: Option<RawPosition>,
    /// The delivery destination.
    #[serde(default)]
    pub destination: Option<RawPosition>,
}

/// A validated coordinate pair. Both fields are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Longitude, degrees east.
    pub longitude: f64,
    /// Latitude, degrees north.
    pub latitude: f64,
}

/// A validated driver location: current position plus destination.
///
/// This is the shape viewers receive; the map client draws the car
/// marker at `currentLocation`, the flag at `destination`, and asks the
/// routing service for the polyline between the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DriverLocation {
    /// The driver's current position.
    #[serde(rename = "currentLocation")]
    pub current_location: Position,
    /// The delivery destination.
    pub destination: Position,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn number_coordinate_parses() {
        let value = CoordinateValue::Number(40.06037);
        assert_eq!(value.as_finite_f64(), Some(40.06037));
    }

    #[test]
    fn string_coordinate_parses() {
        let value = CoordinateValue::Text("-8.41476".to_string());
        assert_eq!(value.as_finite_f64(), Some(-8.41476));
    }

    #[test]
    fn string_coordinate_tolerates_whitespace() {
        let value = CoordinateValue::Text(" 40.5 ".to_string());
        assert_eq!(value.as_finite_f64(), Some(40.5));
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        let value = CoordinateValue::Text("somewhere".to_string());
        assert_eq!(value.as_finite_f64(), None);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(CoordinateValue::Number(f64::NAN).as_finite_f64(), None);
        assert_eq!(CoordinateValue::Number(f64::INFINITY).as_finite_f64(), None);
        assert_eq!(
            CoordinateValue::Text("inf".to_string()).as_finite_f64(),
            None
        );
    }

    #[test]
    fn raw_position_deserializes_mixed_shapes() {
        let raw: RawPosition =
            serde_json::from_str(r#"{"longitude": "-8.43924", "latitude": 39.91344}"#).unwrap();
        assert_eq!(raw.longitude.unwrap().as_finite_f64(), Some(-8.43924));
        assert_eq!(raw.latitude.unwrap().as_finite_f64(), Some(39.91344));
    }

    #[test]
    fn raw_position_accepts_missing_fields() {
        let raw: RawPosition = serde_json::from_str(r#"{"latitude": "40.1"}"#).unwrap();
        assert!(raw.longitude.is_none());
        assert!(raw.latitude.is_some());
    }

    #[test]
    fn raw_driver_location_uses_upstream_field_names() {
        let raw: RawDriverLocation = serde_json::from_str(
            r#"{
                "currentLocation": {"latitude": "39.9", "longitude": "-8.4"},
                "destination": {"latitude": "40.0", "longitude": "-8.5"}
            }"#,
        )
        .unwrap();
        assert!(raw.current_location.is_some());
        assert!(raw.destination.is_some());
    }

    #[test]
    fn driver_location_serializes_with_camel_case_current_location() {
        let loc = DriverLocation {
            current_location: Position {
                longitude: 10.0,
                latitude: 20.0,
            },
            destination: Position {
                longitude: 30.0,
                latitude: 40.0,
            },
        };
        let json = serde_json::to_value(&loc).unwrap();
        assert!(json.get("currentLocation").is_some());
        assert!(json.get("destination").is_some());
    }
}
