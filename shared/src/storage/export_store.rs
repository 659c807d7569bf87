//! Export store trait and in-memory implementation.

use crate::models::{ExportRow, Metric, Sensor, SensorValidationError};
use crate::query::ExportQuery;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur during export store operations.
#[derive(Debug, Error)]
pub enum ExportStoreError {
    /// A connection to the backing store could not be established.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The query failed while executing.
    #[error("Query error: {0}")]
    Query(String),

    /// Failed to acquire lock on the store.
    #[error("Failed to acquire lock on export store")]
    LockError,

    /// A record was rejected on insertion.
    #[error(transparent)]
    Validation(#[from] SensorValidationError),
}

/// Trait for export row sources.
///
/// Implementations must be thread-safe (Send + Sync) and return rows ordered
/// by ascending time.
#[async_trait]
pub trait ExportStore: Send + Sync {
    /// Fetches every row matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or the query fails.
    async fn fetch_rows(&self, query: &ExportQuery) -> Result<Vec<ExportRow>, ExportStoreError>;
}

/// Initial contents for an in-memory store, as loaded from a JSON seed file.
///
/// ```json
/// {
///   "sensors": [{"sensor_id": 1, "name": "A"}],
///   "metrics": [{"sensor_id": 1, "data": 12.5, "time": "2023-11-14T22:30:00Z"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Sensors to insert.
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    /// Metrics to insert.
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// In-memory export store.
///
/// Keeps sensors and metrics as separate collections and joins them per
/// query, so a metric whose sensor is missing still shows up with no name.
#[derive(Debug, Default)]
pub struct InMemoryExportStore {
    sensors: RwLock<HashMap<i64, Sensor>>,
    metrics: RwLock<Vec<Metric>>,
}

impl InMemoryExportStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty in-memory store wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Creates a store holding the given seed data.
    ///
    /// # Errors
    ///
    /// Returns an error if any sensor fails validation.
    pub fn from_seed(seed: SeedData) -> Result<Self, ExportStoreError> {
        let store = Self::new();
        for sensor in seed.sensors {
            store.insert_sensor(sensor)?;
        }
        store.insert_metrics(seed.metrics)?;
        Ok(store)
    }

    /// Inserts a sensor, replacing any sensor with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the sensor fails validation or the lock is poisoned.
    pub fn insert_sensor(&self, sensor: Sensor) -> Result<(), ExportStoreError> {
        sensor.validate_sensor()?;
        let mut sensors = self
            .sensors
            .write()
            .map_err(|_| ExportStoreError::LockError)?;
        sensors.insert(sensor.sensor_id, sensor);
        Ok(())
    }

    /// Inserts a single metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn insert_metric(&self, metric: Metric) -> Result<(), ExportStoreError> {
        self.insert_metrics(vec![metric])
    }

    /// Inserts multiple metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn insert_metrics(&self, new_metrics: Vec<Metric>) -> Result<(), ExportStoreError> {
        let mut metrics = self
            .metrics
            .write()
            .map_err(|_| ExportStoreError::LockError)?;
        metrics.extend(new_metrics);
        Ok(())
    }

    /// Returns the number of stored metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn metric_count(&self) -> Result<usize, ExportStoreError> {
        let metrics = self
            .metrics
            .read()
            .map_err(|_| ExportStoreError::LockError)?;
        Ok(metrics.len())
    }

    fn select(&self, query: &ExportQuery) -> Result<Vec<ExportRow>, ExportStoreError> {
        let sensors = self
            .sensors
            .read()
            .map_err(|_| ExportStoreError::LockError)?;
        let metrics = self
            .metrics
            .read()
            .map_err(|_| ExportStoreError::LockError)?;

        let mut rows: Vec<ExportRow> = metrics
            .iter()
            .filter(|m| query.range.contains(m.time))
            .map(|m| {
                let name = sensors.get(&m.sensor_id).map(|s| s.name.clone());
                ExportRow::new(name, m.data_text(), m.time)
            })
            .filter(|row| query.matches_sensor(row.name.as_deref()))
            .collect();

        rows.sort_by_key(|row| row.time);
        Ok(rows)
    }
}

#[async_trait]
impl ExportStore for InMemoryExportStore {
    async fn fetch_rows(&self, query: &ExportQuery) -> Result<Vec<ExportRow>, ExportStoreError> {
        self.select(query)
    }
}
