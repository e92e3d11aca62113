//! Severity levels.
//!
//! Codes run from `-1` (trace) to `5` (panic), with `6` reserved for
//! [`Level::NoLevel`]. The numeric order is the filter order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LogError;

/// Severity of a log event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Level {
    Trace = -1,
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Panic = 5,
    /// No minimum configured; every event passes.
    #[default]
    NoLevel = 6,
}

impl Level {
    /// Lowest legal code.
    pub const MIN_CODE: i32 = -1;
    /// Highest legal code.
    pub const MAX_CODE: i32 = 6;

    /// All levels in ascending order.
    pub const ALL: [Level; 8] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
        Level::NoLevel,
    ];

    pub fn code(self) -> i8 {
        self as i8
    }

    /// Map a numeric code back to a level, `None` when out of range.
    pub fn from_code(code: i32) -> Option<Level> {
        match code {
            -1 => Some(Level::Trace),
            0 => Some(Level::Debug),
            1 => Some(Level::Info),
            2 => Some(Level::Warn),
            3 => Some(Level::Error),
            4 => Some(Level::Fatal),
            5 => Some(Level::Panic),
            6 => Some(Level::NoLevel),
            _ => None,
        }
    }

    /// Canonical lowercase name as written to the `level` key.
    ///
    /// `NoLevel` has no name; events at that level carry no `level` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
            Level::NoLevel => "",
        }
    }

    /// Whether an event at `event` passes a filter configured at `self`.
    pub fn allows(self, event: Level) -> bool {
        self == Level::NoLevel || self <= event
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for Level {
    type Error = LogError;

    fn try_from(code: i32) -> Result<Self, LogError> {
        Level::from_code(code).ok_or(LogError::InvalidLevel(code))
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, LogError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            "" | "nolevel" => Ok(Level::NoLevel),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
