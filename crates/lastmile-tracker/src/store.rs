//! In-memory order-state store.
//!
//! [`OrderStateStore`] owns the only mutable mapping in the relay: order
//! id to latest known [`OrderRecord`]. All mutation and read access goes
//! through this type; the gateway and hub hold references but never touch
//! the map directly.
//!
//! Each operation takes the lock once and completes under it, so a
//! concurrent reader never observes a partially written record. There is
//! no automatic expiry: records live until an explicit reset.

use std::collections::BTreeMap;

use lastmile_types::{
    CoordinateValue, DriverLocation, OrderId, OrderRecord, Position, RawDriverLocation,
    RawPosition, SCHEMA_VERSION,
};
use tokio::sync::RwLock;

use crate::error::TrackerError;

/// Result of an [`OrderStateStore::upsert`] call.
///
/// `created` distinguishes the first write for an order id from every
/// subsequent one. The classification is derived purely from whether a
/// record already existed, never from any field of the incoming event,
/// and the caller uses it to pick between the `initialRoute` and
/// `routeUpdate` broadcasts.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    /// `true` if no record existed for this order id before the call.
    pub created: bool,
    /// The record as stored.
    pub record: OrderRecord,
}

/// Process-local mapping from order id to latest known state.
#[derive(Debug, Default)]
pub struct OrderStateStore {
    records: RwLock<BTreeMap<OrderId, OrderRecord>>,
}

impl OrderStateStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            records: RwLock::const_new(BTreeMap::new()),
        }
    }

    /// Validate the raw coordinates and write the record.
    ///
    /// On the first write for an order id the record is created
    /// (`created = true`); on every subsequent write the existing
    /// coordinates are overwritten in place (`created = false`).
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Validation`] if either coordinate pair is
    /// missing, non-numeric, or non-finite. Nothing is stored in that
    /// case, and the caller must not broadcast.
    pub async fn upsert(
        &self,
        order_id: &OrderId,
        location: &RawDriverLocation,
    ) -> Result<UpsertOutcome, TrackerError> {
        // Validate before taking the write lock; a rejected event never
        // contends with readers.
        let driver_location = validate_location(location)?;

        let record = OrderRecord {
            order_id: order_id.clone(),
            driver_location,
            version: SCHEMA_VERSION.to_string(),
        };

        let mut records = self.records.write().await;
        let created = records.insert(order_id.clone(), record.clone()).is_none();

        Ok(UpsertOutcome { created, record })
    }

    /// Delete the record for an order id.
    ///
    /// Returns whether a deletion occurred. Removing an absent id is a
    /// no-op, not an error.
    pub async fn remove(&self, order_id: &OrderId) -> bool {
        self.records.write().await.remove(order_id).is_some()
    }

    /// Remove all records unconditionally.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Return the current records, in no guaranteed order.
    ///
    /// Used to replay state to a newly connected viewer.
    pub async fn snapshot_all(&self) -> Vec<OrderRecord> {
        self.records.read().await.values().cloned().collect()
    }

    /// Look up a single record.
    pub async fn get(&self, order_id: &OrderId) -> Option<OrderRecord> {
        self.records.read().await.get(order_id).cloned()
    }

    /// Number of currently tracked orders.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// Validate a raw driver-location payload into stored coordinates.
fn validate_location(raw: &RawDriverLocation) -> Result<DriverLocation, TrackerError> {
    let current_location = validate_position(raw.current_location.as_ref(), "currentLocation")?;
    let destination = validate_position(raw.destination.as_ref(), "destination")?;
    Ok(DriverLocation {
        current_location,
        destination,
    })
}

/// Validate one raw coordinate pair.
fn validate_position(raw: Option<&RawPosition>, field: &str) -> Result<Position, TrackerError> {
    let raw =
        raw.ok_or_else(|| TrackerError::Validation(format!("{field} is missing")))?;
    let longitude = validate_coordinate(raw.longitude.as_ref(), field, "longitude")?;
    let latitude = validate_coordinate(raw.latitude.as_ref(), field, "latitude")?;
    Ok(Position {
        longitude,
        latitude,
    })
}

/// Validate one coordinate field down to a finite `f64`.
fn validate_coordinate(
    value: Option<&CoordinateValue>,
    field: &str,
    axis: &str,
) -> Result<f64, TrackerError> {
    let value = value
        .ok_or_else(|| TrackerError::Validation(format!("{field}.{axis} is missing")))?;
    value.as_finite_f64().ok_or_else(|| {
        TrackerError::Validation(format!("{field}.{axis} is not a finite number"))
    })
}
