//! Export query construction.
//!
//! An export is described by an inclusive time range and an optional exact
//! sensor-name filter. [`ExportQuery::to_sql`] renders it as a parameterized
//! PostgreSQL statement; the values themselves are always bound, never
//! interpolated into the SQL text.
//!
//! # Example
//!
//! ```
//! use shared::query::{ExportQuery, TimeRange};
//!
//! let range = TimeRange::parse(Some("1700000000000"), Some("1700003600000")).unwrap();
//! let query = ExportQuery::new(range).with_sensor("A");
//!
//! assert!(query.to_sql().contains("s.name = $3"));
//! ```

mod export_query;
mod range;

pub use export_query::ExportQuery;
pub use range::{TimeRange, TimeRangeError};
