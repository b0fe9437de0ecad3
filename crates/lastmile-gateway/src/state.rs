//! Shared application state for the gateway server.
//!
//! [`AppState`] holds the injected [`OrderTracker`] and the process
//! start time. It is wrapped in [`Arc`] and handed to Axum via the
//! `State` extractor; handlers never reach for a global.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lastmile_tracker::OrderTracker;
use lastmile_types::TrackingEvent;
use tokio::sync::broadcast;

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The order-state store and notification hub behind one facade.
    pub tracker: Arc<OrderTracker>,
    /// When this gateway process started, for the status page.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create gateway state around an existing tracker.
    pub fn new(tracker: Arc<OrderTracker>) -> Self {
        Self {
            tracker,
            started_at: Utc::now(),
        }
    }

    /// Subscribe to the tracking broadcast channel.
    ///
    /// Returns a receiver that yields every [`TrackingEvent`] published
    /// after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackingEvent> {
        self.tracker.hub().subscribe()
    }
}
