//! Error types for the relay binary.
//!
//! [`RelayError`] is the top-level error type that wraps all possible
//! failure modes during startup and shutdown.

/// Top-level error for the relay binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lastmile_tracker::ConfigError,
    },

    /// The gateway server failed to start.
    #[error("gateway error: {message}")]
    Gateway {
        /// Description of the gateway failure.
        message: String,
    },

    /// Waiting for the shutdown signal failed.
    #[error("signal error: {message}")]
    Signal {
        /// Description of the signal failure.
        message: String,
    },
}
