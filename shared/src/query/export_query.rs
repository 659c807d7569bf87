//! Parameterized export query.

use super::TimeRange;

const BASE_SQL: &str = "SELECT s.name, m.data::text AS data, m.time::timestamptz AS time \
FROM metrics m \
LEFT JOIN sensors s ON m.sensor_id = s.sensor_id \
WHERE m.time BETWEEN $1 AND $2";

const SENSOR_FILTER_SQL: &str = " AND s.name = $3";

const ORDER_SQL: &str = " ORDER BY m.time ASC";

/// A request for export rows: a time range plus an optional sensor filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportQuery {
    /// Inclusive time range.
    pub range: TimeRange,

    /// Exact-match filter on sensor name.
    pub sensor: Option<String>,
}

impl ExportQuery {
    /// Creates a query over the given range with no sensor filter.
    #[must_use]
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            sensor: None,
        }
    }

    /// Sets the sensor name filter.
    #[must_use]
    pub fn with_sensor(mut self, sensor: impl Into<String>) -> Self {
        self.sensor = Some(sensor.into());
        self
    }

    /// Renders the SQL statement.
    ///
    /// Placeholders: `$1` range start, `$2` range end and, when a sensor
    /// filter is set, `$3` sensor name.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::from(BASE_SQL);
        if self.sensor.is_some() {
            sql.push_str(SENSOR_FILTER_SQL);
        }
        sql.push_str(ORDER_SQL);
        sql
    }

    /// Returns true if a row with this sensor name passes the filter.
    ///
    /// Rows without a sensor never pass an active filter, matching SQL
    /// equality against `NULL`.
    #[must_use]
    pub fn matches_sensor(&self, name: Option<&str>) -> bool {
        match (&self.sensor, name) {
            (None, _) => true,
            (Some(wanted), Some(name)) => wanted == name,
            (Some(_), None) => false,
        }
    }
}
