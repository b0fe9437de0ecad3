//! Configuration loading and typed config structures for the relay.
//!
//! The canonical configuration lives in `lastmile-relay.yaml` at the
//! deployment root. This module defines strongly-typed structs that
//! mirror the YAML structure and provides a loader that reads the file.
//! Every field has a default, so an empty or absent file yields a
//! working development configuration.

use std::path::Path;

use serde::Deserialize;

use crate::hub::DEFAULT_BROADCAST_CAPACITY;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level relay configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RelayConfig {
    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Broadcast channel settings.
    #[serde(default)]
    pub channel: ChannelSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl RelayConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the bind address:
    /// - `LASTMILE_HOST` overrides `server.host`
    /// - `LASTMILE_PORT` overrides `server.port` (ignored if not a port)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a file that may not exist.
    ///
    /// A missing file yields the default configuration; environment
    /// overrides apply either way. Development deployments run without
    /// a config file at all.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file exists but cannot be read
    /// or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.server.apply_env_overrides();
            Ok(config)
        }
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSection {
    /// Apply `LASTMILE_HOST` / `LASTMILE_PORT` environment overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("LASTMILE_HOST")
            && !host.is_empty()
        {
            self.host = host;
        }
        if let Ok(port) = std::env::var("LASTMILE_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.port = port;
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Broadcast channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelSection {
    /// Capacity of the viewer broadcast channel.
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

impl Default for ChannelSection {
    fn default() -> Self {
        Self {
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default tracing filter, overridden by `RUST_LOG` at runtime.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

const fn default_broadcast_capacity() -> usize {
    DEFAULT_BROADCAST_CAPACITY
}

fn default_log_filter() -> String {
    String::from("info")
}
