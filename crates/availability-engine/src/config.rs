//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! default_duration_minutes = 60
//! min_duration_minutes = 30
//! max_suggestions = 5
//! window_policy = "first_window"
//! circle_lookback_days = 0
//! circle_lookahead_days = 7
//!
//! [missing_end]
//! kind = "default_duration"
//! minutes = 60
//! ```

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::events::MissingEndPolicy;
use crate::ranker::WindowPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Slot length when a suggested-times request omits `duration`.
    pub default_duration_minutes: i64,
    /// Smallest `duration` a suggested-times request may ask for.
    pub min_duration_minutes: i64,
    /// Cap on the number of suggested slots returned.
    pub max_suggestions: usize,
    pub missing_end: MissingEndPolicy,
    pub window_policy: WindowPolicy,
    /// Whole days before today included in a circle availability window.
    pub circle_lookback_days: i64,
    /// Whole days from the start of today included in a circle availability window.
    pub circle_lookahead_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: 60,
            min_duration_minutes: 30,
            max_suggestions: 5,
            missing_end: MissingEndPolicy::Exclude,
            window_policy: WindowPolicy::FirstWindow,
            circle_lookback_days: 0,
            circle_lookahead_days: 7,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the document is malformed or a value is
    /// out of range.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// # Errors
    /// Returns `EngineError::Config` describing the first out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if self.min_duration_minutes < 1 {
            return Err(EngineError::Config(format!(
                "min_duration_minutes must be at least 1, got {}",
                self.min_duration_minutes
            )));
        }
        if self.default_duration_minutes < self.min_duration_minutes {
            return Err(EngineError::Config(format!(
                "default_duration_minutes ({}) is below min_duration_minutes ({})",
                self.default_duration_minutes, self.min_duration_minutes
            )));
        }
        if self.circle_lookback_days < 0 || self.circle_lookahead_days < 0 {
            return Err(EngineError::Config(
                "circle window day counts must not be negative".to_string(),
            ));
        }
        let span = self
            .circle_lookback_days
            .checked_add(self.circle_lookahead_days)
            .and_then(Duration::try_days)
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "circle window of {} + {} days is out of range",
                    self.circle_lookback_days, self.circle_lookahead_days
                ))
            })?;
        if span.is_zero() {
            return Err(EngineError::Config(
                "circle window must span at least one day".to_string(),
            ));
        }
        Ok(())
    }
}
