//! Fan-out of state-change notifications to connected viewers.
//!
//! [`NotificationHub`] wraps a [`tokio::sync::broadcast`] channel of
//! [`TrackingEvent`]s. Every connected viewer session holds a receiver;
//! each broadcast operation is fire-and-forget with no acknowledgement,
//! no retry, and no queuing for offline viewers. A viewer that falls
//! behind by more than the channel capacity skips to the newest message.
//!
//! Replay is the one exception to fan-out: a newly connected viewer asks
//! for the current store contents and receives them on its own socket
//! only, so replay returns the events to the caller instead of sending
//! them through the channel.

use lastmile_types::{OrderId, OrderRecord, ResetNotice, TrackingEvent};
use tokio::sync::broadcast;
use tracing::debug;

use crate::store::OrderStateStore;

/// Default capacity of the broadcast channel.
///
/// A subscriber that falls behind by more than this many messages
/// receives a [`broadcast::error::RecvError::Lagged`] and resumes from
/// the newest message.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Broadcasts state-change events to all currently connected viewers.
#[derive(Debug)]
pub struct NotificationHub {
    tx: broadcast::Sender<TrackingEvent>,
}

impl NotificationHub {
    /// Create a hub with the given channel capacity.
    ///
    /// A capacity of zero is clamped to one; `broadcast::channel` does
    /// not accept empty buffers.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Register a viewer: returns a receiver for all future broadcasts.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackingEvent> {
        self.tx.subscribe()
    }

    /// Number of currently subscribed viewers.
    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Announce the first sighting of an order to all viewers.
    ///
    /// Returns the number of viewers that received the message; zero
    /// simply means nobody is watching.
    pub fn broadcast_initial(&self, record: &OrderRecord) -> usize {
        self.publish(TrackingEvent::InitialRoute(record.clone()))
    }

    /// Announce updated coordinates for a known order to all viewers.
    pub fn broadcast_update(&self, record: &OrderRecord) -> usize {
        self.publish(TrackingEvent::RouteUpdate(record.clone()))
    }

    /// Announce the removal of one order's tracked state.
    pub fn broadcast_reset(&self, order_id: &OrderId) -> usize {
        self.publish(TrackingEvent::Reset(ResetNotice {
            order_id: order_id.clone(),
        }))
    }

    /// Announce the removal of all tracked state.
    pub fn broadcast_reset_all(&self) -> usize {
        self.publish(TrackingEvent::ResetAll)
    }

    /// Build the replay for one newly connected viewer: every current
    /// record as an `initialRoute` event, regardless of whether that
    /// viewer saw it before.
    ///
    /// The caller delivers these on the requesting session only; they do
    /// not pass through the broadcast channel.
    pub async fn replay(&self, store: &OrderStateStore) -> Vec<TrackingEvent> {
        store
            .snapshot_all()
            .await
            .into_iter()
            .map(TrackingEvent::InitialRoute)
            .collect()
    }

    fn publish(&self, event: TrackingEvent) -> usize {
        // send returns Err only when there are zero receivers, which is
        // normal when no viewer is connected.
        let receivers = self.tx.send(event.clone()).unwrap_or(0);
        debug!(event = event.name(), receivers, "tracking event published");
        receivers
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}
