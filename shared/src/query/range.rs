//! Millisecond time ranges supplied by callers.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced while turning raw `from`/`to` parameters into a range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    /// One or both bounds were absent or empty.
    #[error("Both 'from' and 'to' timestamps are required.")]
    Missing,

    /// A bound was not an integer number of milliseconds, or is outside the
    /// representable timestamp range.
    #[error("Invalid timestamp format. Please provide timestamps in milliseconds.")]
    InvalidFormat,
}

/// An inclusive `[start, end]` time range.
///
/// No ordering check is applied: an inverted range is kept as-is and simply
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Builds a range from two epoch-millisecond values.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::InvalidFormat`] if either value cannot be
    /// represented as a timestamp.
    pub fn from_millis(from_ms: i64, to_ms: i64) -> Result<Self, TimeRangeError> {
        Ok(Self {
            start: millis_to_datetime(from_ms)?,
            end: millis_to_datetime(to_ms)?,
        })
    }

    /// Parses raw query-string values.
    ///
    /// Both values must be present and non-empty before either is parsed, so
    /// a missing bound is always reported as [`TimeRangeError::Missing`] even
    /// when the other bound is malformed.
    ///
    /// # Errors
    ///
    /// - [`TimeRangeError::Missing`] if either value is absent or empty
    /// - [`TimeRangeError::InvalidFormat`] if either value is not an integer
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, TimeRangeError> {
        let (Some(from), Some(to)) = (non_empty(from), non_empty(to)) else {
            return Err(TimeRangeError::Missing);
        };

        let from_ms = parse_millis(from)?;
        let to_ms = parse_millis(to)?;
        Self::from_millis(from_ms, to_ms)
    }

    /// Returns true if `time` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time <= self.end
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_millis(value: &str) -> Result<i64, TimeRangeError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TimeRangeError::InvalidFormat)
}

fn millis_to_datetime(ms: i64) -> Result<DateTime<Utc>, TimeRangeError> {
    DateTime::from_timestamp_millis(ms).ok_or(TimeRangeError::InvalidFormat)
}
