//! Configuration for a cart session.
//!
//! Values come from environment variables, fall back to defaults, and are
//! validated before use.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TOURCART_SNAPSHOT_PATH` | JSON file used to persist the cart | none (memory only) |
//! | `TOURCART_BROADCAST_CAPACITY` | action broadcast buffer | `16` |
//! | `TOURCART_LOG` | `tracing` filter directive | `tourcart=debug,tourcart_runtime=debug` |
//!
//! # Example
//!
//! ```no_run
//! use tourcart::config::CartConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::from_env()?;
//! println!("Snapshot path: {:?}", config.snapshot_path);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tourcart_runtime::StoreConfig;

/// Environment variable holding the snapshot path
pub const SNAPSHOT_PATH_VAR: &str = "TOURCART_SNAPSHOT_PATH";
/// Environment variable holding the broadcast capacity
pub const BROADCAST_CAPACITY_VAR: &str = "TOURCART_BROADCAST_CAPACITY";
/// Environment variable holding the log filter
pub const LOG_VAR: &str = "TOURCART_LOG";

/// Upper bound accepted for the broadcast capacity
const MAX_BROADCAST_CAPACITY: usize = 65_536;

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Cart session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Where to persist the cart; `None` keeps it in memory only
    pub snapshot_path: Option<PathBuf>,
    /// Capacity of the action broadcast channel
    pub broadcast_capacity: usize,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            broadcast_capacity: 16,
            log_filter: "tourcart=debug,tourcart_runtime=debug".to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or validation fails
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns error if a value cannot be parsed or validation fails
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(SNAPSHOT_PATH_VAR) {
            config.snapshot_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = get(BROADCAST_CAPACITY_VAR) {
            config.broadcast_capacity =
                raw.trim()
                    .parse()
                    .map_err(|error: std::num::ParseIntError| ConfigError::InvalidValue {
                        var: BROADCAST_CAPACITY_VAR,
                        value: raw.clone(),
                        reason: error.to_string(),
                    })?;
        }

        if let Some(filter) = get(LOG_VAR) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the snapshot path
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Set the broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "broadcast_capacity must be greater than 0".to_string(),
            ));
        }

        if self.broadcast_capacity > MAX_BROADCAST_CAPACITY {
            return Err(ConfigError::ValidationError(format!(
                "broadcast_capacity must be at most {MAX_BROADCAST_CAPACITY}"
            )));
        }

        if let Some(path) = &self.snapshot_path {
            if path.file_name().is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "snapshot_path {} does not name a file",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Runtime settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_broadcast_capacity(self.broadcast_capacity)
    }
}
