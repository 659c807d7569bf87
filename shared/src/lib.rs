//! Sensor Export Shared Library
//!
//! This crate contains the types and building blocks behind the sensor
//! export service: the data models, export query construction, the storage
//! abstraction, and the CSV codec.
//!
//! # Modules
//!
//! - [`models`] - Sensors, metrics, and the flattened export row
//! - [`query`] - Time ranges and the parameterized export query
//! - [`storage`] - The `ExportStore` trait with PostgreSQL and in-memory backends
//! - [`export`] - CSV encoding and decoding
//!
//! # Example
//!
//! ```
//! use shared::export::encode_rows;
//! use shared::models::ExportRow;
//! use shared::query::TimeRange;
//!
//! let range = TimeRange::parse(Some("1700001000000"), Some("1700002000000")).unwrap();
//! let rows = vec![ExportRow::new(Some("A".into()), Some("12.5".into()), range.start)];
//!
//! let csv = encode_rows(&rows).unwrap();
//! assert_eq!(csv, b"name,data,time\nA,12.5,2023-11-14 22:30:00\n");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod export;
pub mod models;
pub mod query;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
