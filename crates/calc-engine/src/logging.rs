//! Tracing subscriber setup for native shells
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! shell's choice. `RUST_LOG` wins over [`LogConfig::level`] when set.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::core::{CalcError, CalcResult};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `"calc_engine=debug"`
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Sets the fallback filter directive
    #[must_use]
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    /// Switches JSON output on or off
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Builds the filter: `RUST_LOG` if present, else [`LogConfig::level`]
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidConfig`] if the fallback directive does not
    /// parse.
    pub fn env_filter(&self) -> CalcResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|e| CalcError::InvalidConfig(format!("log level '{}': {e}", self.level))),
        }
    }
}

/// Installs a global fmt subscriber
///
/// Returns `Ok(false)` if a global subscriber was already installed, which
/// makes repeated calls from tests harmless.
///
/// # Errors
///
/// Returns [`CalcError::InvalidConfig`] for an unparseable level directive.
pub fn init(config: &LogConfig) -> CalcResult<bool> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}
