//! Search configuration loaded from TOML.
//!
//! ```toml
//! slot_count = 3
//! calendar_id = "primary"
//! colleague_calendars = ["alice@example.com"]
//!
//! [policy]
//! work_start_hour = 9
//! work_end_hour = 17
//! meeting_duration_minutes = 30
//! preferred_weekdays = [0, 1, 2, 3, 4]
//! preferred_hours = [10, 11, 14]
//! lookahead_days = 7
//! reference_timezone = "Europe/Berlin"
//! ```
//!
//! Every key is optional. A missing file falls back to the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::policy::PolicySettings;

pub const DEFAULT_SLOT_COUNT: usize = 3;
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Fully-resolved search settings: policy plus which calendars to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub slot_count: usize,
    pub calendar_id: String,
    pub colleague_calendars: Vec<String>,
    pub policy: PolicySettings,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            colleague_calendars: Vec::new(),
            policy: PolicySettings::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    /// Returns `SlotError::Config` if the document is not valid TOML or a key has the
    /// wrong type.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| SlotError::Config(e.to_string()))
    }

    /// Load a configuration file.
    ///
    /// # Errors
    /// Returns `SlotError::Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SlotError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` if it exists, otherwise fall back to [`SearchConfig::default`].
    ///
    /// # Errors
    /// Returns `SlotError::Config` if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading search configuration");
                Self::load(path)
            }
            Some(path) => {
                tracing::info!(path = %path.display(), "configuration file not found; using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
