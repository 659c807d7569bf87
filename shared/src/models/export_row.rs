//! Export row model.

use chrono::{DateTime, Utc};

/// Format used for the `time` column of exported files.
///
/// Fractional seconds are appended only when non-zero.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One row of an export: the join of a metric with its sensor, projected to
/// `(name, data, time)`.
///
/// `name` is `None` when the metric references a sensor that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ExportRow {
    /// Sensor name.
    pub name: Option<String>,
    /// Measurement payload rendered as text.
    pub data: Option<String>,
    /// Measurement timestamp.
    pub time: DateTime<Utc>,
}

impl ExportRow {
    /// Creates a new export row.
    #[must_use]
    pub fn new(name: Option<String>, data: Option<String>, time: DateTime<Utc>) -> Self {
        Self { name, data, time }
    }

    /// Returns the timestamp formatted for the export file.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}
