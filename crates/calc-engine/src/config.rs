//! Engine configuration
//!
//! Serializable with serde so a shell can ship it as JSON next to the page.

use serde::{Deserialize, Serialize};

use crate::core::format::{DEFAULT_SIGNIFICANT_DIGITS, MAX_SIGNIFICANT_DIGITS};
use crate::core::{CalcError, CalcResult};

/// What happens to a pending post-error auto-clear when new input arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoClearPolicy {
    /// Any input event cancels the pending auto-clear
    #[default]
    CancelOnInput,
    /// The auto-clear always fires at its deadline, wiping whatever was typed
    /// since the error
    Uncancelable,
}

/// Configuration for [`crate::engine::ExpressionEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay before an error display clears itself
    pub error_clear_delay_ms: u64,
    /// Significant digits kept when displaying a finite result
    pub significant_digits: u32,
    /// Pending auto-clear behavior on new input
    pub auto_clear: AutoClearPolicy,
    /// Treat infinite and NaN results as errors instead of values
    pub reject_non_finite: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            error_clear_delay_ms: Self::DEFAULT_ERROR_CLEAR_DELAY_MS,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            auto_clear: AutoClearPolicy::default(),
            reject_non_finite: false,
        }
    }
}

impl EngineConfig {
    /// Default error display time
    pub const DEFAULT_ERROR_CLEAR_DELAY_MS: u64 = 900;

    /// Creates the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error display time
    #[must_use]
    pub const fn with_error_clear_delay_ms(mut self, ms: u64) -> Self {
        self.error_clear_delay_ms = ms;
        self
    }

    /// Sets the number of significant digits
    #[must_use]
    pub const fn with_significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Sets the auto-clear policy
    #[must_use]
    pub const fn with_auto_clear(mut self, policy: AutoClearPolicy) -> Self {
        self.auto_clear = policy;
        self
    }

    /// Sets whether non-finite results are errors
    #[must_use]
    pub const fn with_reject_non_finite(mut self, reject: bool) -> Self {
        self.reject_non_finite = reject;
        self
    }

    /// Checks value ranges
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidConfig`] if `significant_digits` is outside
    /// `1..=17`.
    pub fn validate(&self) -> CalcResult<()> {
        if !(1..=MAX_SIGNIFICANT_DIGITS).contains(&self.significant_digits) {
            return Err(CalcError::InvalidConfig(format!(
                "significant_digits must be between 1 and {MAX_SIGNIFICANT_DIGITS}, got {}",
                self.significant_digits
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration; missing fields take defaults
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidConfig`] on malformed JSON or out-of-range
    /// values.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CalcError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidConfig`] if serialization fails.
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::InvalidConfig(e.to_string()))
    }
}
