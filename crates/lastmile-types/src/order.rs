//! Order records and the inbound location-event shape.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geo::{DriverLocation, RawDriverLocation};
use crate::ids::OrderId;

/// The schema version tag this relay accepts and emits.
///
/// Inbound events declaring any other tag are dropped; every stored
/// record and outbound payload carries exactly this value. The browser
/// client discards messages whose `version` field does not match.
pub const SCHEMA_VERSION: &str = "1.1";

/// The latest known state of one tracked order.
///
/// Also the broadcast payload: the store keeps records in exactly the
/// shape viewers receive, so fan-out is a clone, not a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OrderRecord {
    /// The order this record tracks.
    pub order_id: OrderId,
    /// Validated current position and destination.
    #[serde(rename = "driverLocation")]
    pub driver_location: DriverLocation,
    /// Schema version tag, always [`SCHEMA_VERSION`].
    pub version: String,
}

/// An inbound location event, not yet validated.
///
/// Extracted from the `data` field of a `SendingCoordinates` webhook
/// envelope. Upstream envelopes carry additional order metadata
/// (materials, delivery address, status); the relay only reads the
/// fields below and ignores the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationEvent {
    /// The order the coordinates belong to.
    pub order_id: OrderId,
    /// Raw coordinate payload, validated by the store.
    #[serde(default, rename = "driverLocation")]
    pub driver_location: RawDriverLocation,
    /// Declared schema version, if the sender stamps one.
    #[serde(default)]
    pub version: Option<String>,
}
