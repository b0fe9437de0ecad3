//! The ingestion facade: store mutation wired to hub broadcast.
//!
//! [`OrderTracker`] owns one [`OrderStateStore`] and one
//! [`NotificationHub`] and keeps the documented control flow in a single
//! place: ingest, then upsert, then exactly one broadcast. The gateway
//! handlers stay thin; they parse transport envelopes and call in here.
//!
//! The tracker is created at process start, injected into the gateway as
//! shared state, and torn down with the process. It is never reachable
//! as an ambient global.

use lastmile_types::{LocationEvent, OrderId, TrackingEvent, SCHEMA_VERSION};
use tracing::debug;

use crate::error::TrackerError;
use crate::hub::NotificationHub;
use crate::store::{OrderStateStore, UpsertOutcome};

/// Store and hub behind one ingestion surface.
#[derive(Debug)]
pub struct OrderTracker {
    store: OrderStateStore,
    hub: NotificationHub,
}

impl OrderTracker {
    /// Create a tracker with an empty store and the given broadcast
    /// channel capacity.
    pub fn new(broadcast_capacity: usize) -> Self {
        Self {
            store: OrderStateStore::new(),
            hub: NotificationHub::new(broadcast_capacity),
        }
    }

    /// The underlying store. Read access for handlers and tests.
    pub const fn store(&self) -> &OrderStateStore {
        &self.store
    }

    /// The underlying hub. Viewer sessions subscribe through this.
    pub const fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    /// Process one inbound location event.
    ///
    /// Checks the declared schema version, upserts the coordinates, and
    /// broadcasts `initialRoute` for a creation or `routeUpdate` for an
    /// overwrite.
    ///
    /// # Errors
    ///
    /// [`TrackerError::SchemaVersionMismatch`] if the event declares a
    /// version other than [`SCHEMA_VERSION`], or
    /// [`TrackerError::Validation`] if the coordinates do not validate.
    /// On error nothing is stored and nothing is broadcast.
    pub async fn ingest_location(
        &self,
        event: &LocationEvent,
    ) -> Result<UpsertOutcome, TrackerError> {
        if let Some(version) = &event.version
            && version != SCHEMA_VERSION
        {
            return Err(TrackerError::version_mismatch(version.clone()));
        }

        let outcome = self
            .store
            .upsert(&event.order_id, &event.driver_location)
            .await?;

        let receivers = if outcome.created {
            self.hub.broadcast_initial(&outcome.record)
        } else {
            self.hub.broadcast_update(&outcome.record)
        };
        debug!(
            order_id = %outcome.record.order_id,
            created = outcome.created,
            receivers,
            "location event ingested"
        );

        Ok(outcome)
    }

    /// Remove one order's tracked state.
    ///
    /// Broadcasts `reset` only when a record was actually deleted;
    /// resetting an unknown order is a silent no-op.
    pub async fn reset_order(&self, order_id: &OrderId) -> bool {
        let removed = self.store.remove(order_id).await;
        if removed {
            self.hub.broadcast_reset(order_id);
        }
        debug!(%order_id, removed, "reset processed");
        removed
    }

    /// Remove all tracked state and tell every viewer to clear the map.
    pub async fn reset_all(&self) {
        self.store.clear().await;
        self.hub.broadcast_reset_all();
        debug!("reset-all processed");
    }

    /// Build the replay for one newly connected viewer.
    pub async fn replay(&self) -> Vec<TrackingEvent> {
        self.hub.replay(&self.store).await
    }
}

impl Default for OrderTracker {
    fn default() -> Self {
        Self::new(crate::hub::DEFAULT_BROADCAST_CAPACITY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use lastmile_types::{RawDriverLocation, RawPosition};

    use super::*;

    fn event(order_id: &str, lon: f64, lat: f64) -> LocationEvent {
        LocationEvent {
            order_id: OrderId::new(order_id),
            driver_location: RawDriverLocation {
                current_location: Some(RawPosition::from_f64(lon, lat)),
                destination: Some(RawPosition::from_f64(30.0, 40.0)),
            },
            version: None,
        }
    }

    #[tokio::test]
    async fn ingest_broadcasts_initial_then_update() {
        let tracker = OrderTracker::default();
        let mut rx = tracker.hub().subscribe();

        let first = tracker.ingest_location(&event("A1", 10.0, 20.0)).await.unwrap();
        let second = tracker.ingest_location(&event("A1", 11.0, 21.0)).await.unwrap();
        assert!(first.created);
        assert!(!second.created);

        match rx.recv().await.unwrap() {
            TrackingEvent::InitialRoute(record) => {
                assert_eq!(record.driver_location.current_location.longitude, 10.0);
            }
            other => panic!("expected initialRoute, got {}", other.name()),
        }
        match rx.recv().await.unwrap() {
            TrackingEvent::RouteUpdate(record) => {
                assert_eq!(record.driver_location.current_location.longitude, 11.0);
            }
            other => panic!("expected routeUpdate, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn version_mismatch_is_dropped_before_the_store() {
        let tracker = OrderTracker::default();
        let mut rx = tracker.hub().subscribe();

        let mut bad = event("A1", 10.0, 20.0);
        bad.version = Some("1.0".to_string());

        let err = tracker.ingest_location(&bad).await.unwrap_err();
        assert!(matches!(err, TrackerError::SchemaVersionMismatch { .. }));
        assert!(tracker.store().is_empty().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn matching_version_is_accepted() {
        let tracker = OrderTracker::default();
        let mut good = event("A1", 10.0, 20.0);
        good.version = Some(SCHEMA_VERSION.to_string());

        assert!(tracker.ingest_location(&good).await.unwrap().created);
    }

    #[tokio::test]
    async fn validation_failure_broadcasts_nothing() {
        let tracker = OrderTracker::default();
        let mut rx = tracker.hub().subscribe();

        let mut bad = event("A1", 10.0, 20.0);
        bad.driver_location.destination = None;

        assert!(tracker.ingest_location(&bad).await.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn reset_known_order_broadcasts() {
        let tracker = OrderTracker::default();
        tracker.ingest_location(&event("A1", 10.0, 20.0)).await.unwrap();

        let mut rx = tracker.hub().subscribe();
        assert!(tracker.reset_order(&OrderId::new("A1")).await);

        match rx.recv().await.unwrap() {
            TrackingEvent::Reset(notice) => assert_eq!(notice.order_id.as_str(), "A1"),
            other => panic!("expected reset, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn reset_unknown_order_is_silent() {
        let tracker = OrderTracker::default();
        let mut rx = tracker.hub().subscribe();

        assert!(!tracker.reset_order(&OrderId::new("ghost")).await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn reset_all_clears_and_broadcasts() {
        let tracker = OrderTracker::default();
        tracker.ingest_location(&event("A1", 10.0, 20.0)).await.unwrap();
        tracker.ingest_location(&event("A2", 12.0, 22.0)).await.unwrap();

        let mut rx = tracker.hub().subscribe();
        tracker.reset_all().await;

        assert!(tracker.store().is_empty().await);
        assert!(matches!(rx.recv().await.unwrap(), TrackingEvent::ResetAll));
        assert!(tracker.replay().await.is_empty());
    }

    #[tokio::test]
    async fn replay_matches_upserts_minus_removes() {
        let tracker = OrderTracker::default();
        for (id, lon) in [("A1", 10.0), ("A2", 11.0), ("A3", 12.0), ("A4", 13.0)] {
            tracker.ingest_location(&event(id, lon, 20.0)).await.unwrap();
        }
        tracker.reset_order(&OrderId::new("A2")).await;
        tracker.reset_order(&OrderId::new("A4")).await;

        let replay = tracker.replay().await;
        assert_eq!(replay.len(), 2);

        let mut ids: Vec<String> = replay
            .iter()
            .map(|event| match event {
                TrackingEvent::InitialRoute(record) => record.order_id.to_string(),
                other => panic!("expected initialRoute, got {}", other.name()),
            })
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["A1".to_string(), "A3".to_string()]);
    }

    #[tokio::test]
    async fn order_is_trackable_again_after_reset() {
        let tracker = OrderTracker::default();
        let id = OrderId::new("A1");

        tracker.ingest_location(&event("A1", 10.0, 20.0)).await.unwrap();
        tracker.reset_order(&id).await;

        let outcome = tracker.ingest_location(&event("A1", 15.0, 25.0)).await.unwrap();
        assert!(outcome.created);
    }
}
