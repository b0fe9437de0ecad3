//! Shared type definitions for the Lastmile tracking relay.
//!
//! This crate is the single source of truth for the types that cross
//! crate boundaries: identifiers, coordinate shapes, order records, and
//! the viewer wire protocol. Types that reach the map dashboard carry
//! `ts-rs` derives so the frontend consumes generated `TypeScript`
//! bindings instead of hand-written mirrors.
//!
//! # Modules
//!
//! - [`ids`] -- Order and viewer-session identifiers
//! - [`geo`] -- Raw and validated coordinate types
//! - [`order`] -- Order records and the inbound location-event shape
//! - [`events`] -- The `WebSocket` wire protocol for viewers

pub mod events;
pub mod geo;
pub mod ids;
pub mod order;

// Re-export all public types at crate root for convenience.
pub use events::{ResetNotice, TrackingEvent, ViewerRequest};
pub use geo::{CoordinateValue, DriverLocation, Position, RawDriverLocation, RawPosition};
pub use ids::{OrderId, ViewerId};
pub use order::{LocationEvent, OrderRecord, SCHEMA_VERSION};
