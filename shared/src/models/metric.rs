//! Metric data model.
//!
//! A metric is a single timestamped measurement. Its payload is opaque at this
//! layer: it may be a number, a string, or a structured JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single timestamped measurement associated with a sensor.
///
/// # Example
///
/// ```
/// use shared::chrono::{TimeZone, Utc};
/// use shared::models::Metric;
/// use shared::serde_json::json;
///
/// let time = Utc.timestamp_millis_opt(1_700_001_000_000).unwrap();
/// let metric = Metric::new(1, json!(12.5), time);
///
/// assert_eq!(metric.data_text().as_deref(), Some("12.5"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Reference to the owning sensor. May point at a sensor that does not exist.
    pub sensor_id: i64,

    /// Measurement payload.
    pub data: Value,

    /// When the measurement was taken.
    pub time: DateTime<Utc>,
}

impl Metric {
    /// Creates a new metric.
    #[must_use]
    pub fn new(sensor_id: i64, data: Value, time: DateTime<Utc>) -> Self {
        Self {
            sensor_id,
            data,
            time,
        }
    }

    /// Returns the payload rendered as text, the same way the SQL projection
    /// casts it (`data::text`). `None` for a null payload.
    #[must_use]
    pub fn data_text(&self) -> Option<String> {
        payload_text(&self.data)
    }
}

/// Renders an opaque payload as a single text field.
///
/// Strings are emitted without quotes, numbers and booleans in their natural
/// form, and structured values as compact JSON.
#[must_use]
pub fn payload_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}
