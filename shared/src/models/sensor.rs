//! Sensor data model.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// A named source of measurements.
///
/// # Example
///
/// ```
/// use shared::models::Sensor;
///
/// let sensor = Sensor::new(1, "boiler-inlet");
/// assert!(sensor.validate_sensor().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Sensor {
    /// Opaque identifier used as the join key for metrics.
    pub sensor_id: i64,

    /// Unique, human-readable sensor name.
    #[validate(length(min = 1, max = 255, message = "Sensor name must be 1-255 characters"))]
    pub name: String,
}

/// Errors that can occur during sensor validation.
#[derive(Debug, Error)]
pub enum SensorValidationError {
    /// The sensor name is empty.
    #[error("Sensor name cannot be empty")]
    EmptyName,

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl Sensor {
    /// Creates a new sensor.
    #[must_use]
    pub fn new(sensor_id: i64, name: impl Into<String>) -> Self {
        Self {
            sensor_id,
            name: name.into(),
        }
    }

    /// Validates the sensor.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or longer than 255 characters.
    pub fn validate_sensor(&self) -> Result<(), SensorValidationError> {
        if self.name.is_empty() {
            return Err(SensorValidationError::EmptyName);
        }
        self.validate()?;
        Ok(())
    }
}
