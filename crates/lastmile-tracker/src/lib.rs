//! Order-state store and notification hub for the Lastmile relay.
//!
//! This crate is the core of the system: a process-local mapping from
//! order id to its latest known location snapshot, and the fan-out of
//! state changes to connected viewers.
//!
//! # Architecture
//!
//! [`OrderStateStore`] owns the mapping and all access to it. Each
//! operation is atomic under its lock; the created-vs-updated
//! classification is the store's documented return contract, derived
//! purely from record existence. [`NotificationHub`] broadcasts
//! [`TrackingEvent`](lastmile_types::TrackingEvent)s over a
//! [`tokio::sync::broadcast`] channel, fire-and-forget, and builds the
//! per-viewer replay from a store snapshot. [`OrderTracker`] ties the
//! two together so every mutation is followed by exactly the right
//! broadcast.
//!
//! Nothing here persists: a restart forgets all tracked orders, and the
//! upstream provider re-populates the store with the next events.

pub mod config;
pub mod error;
pub mod hub;
pub mod store;
pub mod tracker;

// Re-export primary types for convenience.
pub use config::{ConfigError, RelayConfig};
pub use error::TrackerError;
pub use hub::{NotificationHub, DEFAULT_BROADCAST_CAPACITY};
pub use store::{OrderStateStore, UpsertOutcome};
pub use tracker::OrderTracker;
