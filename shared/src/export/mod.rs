//! Delimited-text export of [`ExportRow`](crate::models::ExportRow)s.
//!
//! Files carry a `name,data,time` header followed by one record per row, in
//! the order given. Null fields are written as empty fields.

mod csv_codec;

pub use csv_codec::{decode_rows, encode_rows, CsvExportError, CSV_HEADER};

/// File name used for downloaded exports.
pub const EXPORT_FILE_NAME: &str = "sensor_data.csv";

/// MIME type of exported files.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";
