//! Data models for the sensor export service.
//!
//! `Sensor` and `Metric` mirror the rows owned by the relational store;
//! `ExportRow` is the flattened projection that ends up in the CSV file.

pub mod export_row;
pub mod metric;
pub mod sensor;

pub use export_row::ExportRow;
pub use metric::{payload_text, Metric};
pub use sensor::{Sensor, SensorValidationError};
