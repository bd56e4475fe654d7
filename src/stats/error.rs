//! Statistics error types
//!
//! Per-record timestamp failures are not errors: those records are skipped.
//! Only malformed range input rejects a request.

use thiserror::Error;

/// Errors that can occur while computing statistics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A range bound was not a `YYYY-MM-DD` calendar date
    #[error("Invalid date format for '{field}': {value}")]
    DateParse { field: &'static str, value: String },

    /// Configured UTC offset is out of range
    #[error("Invalid timezone offset: {0} minutes")]
    InvalidTimezone(i32),
}
