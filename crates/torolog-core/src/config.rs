//! Logger configuration.

use serde::{Deserialize, Serialize};

use crate::error::LogResult;
use crate::level::Level;

/// Settings a logger is constructed from.
///
/// ```json
/// { "level": "warn" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level; absent means unfiltered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
}

impl LoggerConfig {
    pub fn with_level(level: Level) -> Self {
        Self { level: Some(level) }
    }

    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> LogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The effective minimum level.
    pub fn level(&self) -> Level {
        self.level.unwrap_or(Level::NoLevel)
    }
}
