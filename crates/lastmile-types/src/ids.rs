//! Identifier types for orders and viewer sessions.
//!
//! [`OrderId`] is the key of the tracking store. Order identifiers are
//! assigned by the upstream order system and are opaque to the relay, so
//! the newtype wraps a [`String`] rather than a [`Uuid`].
//!
//! [`ViewerId`] identifies one connected `WebSocket` session for logging
//! and diagnostics. Viewer IDs are generated relay-side as UUID v7
//! (time-ordered), so connection logs sort chronologically.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Opaque identifier for a tracked order.
///
/// Assigned upstream, never parsed or interpreted here. Used as the
/// unique key of the order-state store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OrderId(pub String);

impl OrderId {
    /// Create an order identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner [`String`] value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Unique identifier for a connected viewer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ViewerId(pub Uuid);

impl ViewerId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ViewerId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ViewerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ViewerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ViewerId> for Uuid {
    fn from(id: ViewerId) -> Self {
        id.0
    }
}
