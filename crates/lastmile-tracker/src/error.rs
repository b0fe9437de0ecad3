//! Error taxonomy for event ingestion.
//!
//! Every [`TrackerError`] is terminal for the single event that caused
//! it: the event is dropped and logged, nothing is stored, nothing is
//! broadcast, and no other order or viewer is affected. The relay never
//! retries on its own and never surfaces these errors to viewers.

use lastmile_types::SCHEMA_VERSION;

/// Reasons an inbound event is dropped without touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Malformed or incomplete coordinate data.
    #[error("invalid location data: {0}")]
    Validation(String),

    /// An inbound event type the relay does not recognize.
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    /// The event declared a schema version other than the accepted one.
    #[error("schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch {
        /// The version this relay accepts, always [`SCHEMA_VERSION`].
        expected: &'static str,
        /// The version the event declared.
        found: String,
    },
}

impl TrackerError {
    /// Build a [`TrackerError::SchemaVersionMismatch`] for a declared tag.
    pub const fn version_mismatch(found: String) -> Self {
        Self::SchemaVersionMismatch {
            expected: SCHEMA_VERSION,
            found,
        }
    }
}
