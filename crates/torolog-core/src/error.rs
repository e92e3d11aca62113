//! Error types for the torolog engine

use thiserror::Error;

/// Errors raised by the engine's fallible helpers.
///
/// The emit path never returns these to callers; they are reported through
/// `tracing` and dropped.
#[derive(Error, Debug)]
pub enum LogError {
    /// Numeric level code outside `-1..=6`
    #[error("Invalid level code: {0}")]
    InvalidLevel(i32),

    /// Level name that matches no known level
    #[error("Unknown level name: {0:?}")]
    UnknownLevel(String),

    /// Writing to the sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an event or decoding a config failed
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result alias for engine operations
pub type LogResult<T> = Result<T, LogError>;
