//! Core error types for dayweave-core.
//!
//! Errors are split into small domain enums wrapped by [`CoreError`] so
//! callers can match on the failure class without string inspection.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for dayweave-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed time interval
    #[error("Interval error: {0}")]
    Interval(#[from] IntervalError),

    /// Invalid preference or task input
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task splitting failed
    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors for malformed time intervals.
#[derive(Error, Debug)]
pub enum IntervalError {
    /// Interval end does not come after its start
    #[error("Invalid interval: end ({end}) must be after start ({start})")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Errors for invalid `Preference` or `Task` inputs.
///
/// Configuration errors abort a planning call with no partial result.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Preference has no working-hours windows
    #[error("Working hours must not be empty")]
    EmptyWorkingHours,

    /// Minimum block unit exceeds the focus cap
    #[error("min_block_minutes ({min_block}) must not exceed max_focus_minutes ({max_focus})")]
    BlockExceedsFocus { min_block: i64, max_focus: i64 },

    /// A daily window string is not valid HH:mm
    #[error("Invalid time-of-day '{value}': expected HH:mm")]
    BadClockTime { value: String },
}

/// Errors raised when a task cannot be split into focus chunks.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Policy contradiction: the minimum block can never fit under the cap
    #[error("Cannot split: min block ({min_block} min) exceeds focus cap ({max_focus} min)")]
    BlockExceedsFocus { min_block: i64, max_focus: i64 },

    /// Task too small to honor the minimum block unit
    #[error("Task duration ({duration} min) is below the minimum block unit ({min_block} min)")]
    BelowMinimumBlock { duration: i64, min_block: i64 },

    /// No chunk count yields balanced chunks within the allowed bounds
    #[error("Cannot split {duration} min into balanced chunks within [{min_block}, {max_focus}] min")]
    NoBalancedPartition {
        duration: i64,
        min_block: i64,
        max_focus: i64,
    },

    /// Only flexible tasks carry an estimated duration to split
    #[error("Task '{id}' is not a flexible task")]
    NotFlexible { id: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
