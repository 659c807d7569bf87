//! CSV encoding and decoding built on the `csv` crate.

use crate::models::export_row::TIME_FORMAT;
use crate::models::ExportRow;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column names, in file order.
pub const CSV_HEADER: [&str; 3] = ["name", "data", "time"];

/// Errors that can occur while encoding or decoding an export file.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// The underlying CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory buffer could not be flushed.
    #[error("Failed to flush CSV buffer: {0}")]
    Flush(#[from] std::io::Error),

    /// The header row is not `name,data,time`.
    #[error("Unexpected CSV header: {0}")]
    Header(String),

    /// A `time` field could not be parsed.
    #[error("Invalid time value '{value}': {source}")]
    Time {
        /// The offending field.
        value: String,
        /// Parser error.
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    name: String,
    data: String,
    time: String,
}

impl From<&ExportRow> for CsvRecord {
    fn from(row: &ExportRow) -> Self {
        Self {
            name: row.name.clone().unwrap_or_default(),
            data: row.data.clone().unwrap_or_default(),
            time: row.formatted_time(),
        }
    }
}

impl CsvRecord {
    fn into_row(self) -> Result<ExportRow, CsvExportError> {
        let time = NaiveDateTime::parse_from_str(&self.time, TIME_FORMAT)
            .map_err(|source| CsvExportError::Time {
                value: self.time.clone(),
                source,
            })?
            .and_utc();

        Ok(ExportRow::new(
            Some(self.name).filter(|s| !s.is_empty()),
            Some(self.data).filter(|s| !s.is_empty()),
            time,
        ))
    }
}

/// Encodes rows as CSV with a header line, entirely in memory.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn encode_rows(rows: &[ExportRow]) -> Result<Vec<u8>, CsvExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(CsvRecord::from(row))?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Parses an export file back into rows.
///
/// Empty `name` and `data` fields decode as `None`. The encoder writes a null
/// field and an empty string identically, so `Some("")` comes back as `None`.
///
/// # Errors
///
/// Returns an error if the header is wrong, a record is malformed, or a time
/// field does not match the export format.
pub fn decode_rows(bytes: &[u8]) -> Result<Vec<ExportRow>, CsvExportError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers()?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(CsvExportError::Header(headers.iter().collect::<Vec<_>>().join(",")));
    }

    reader
        .deserialize::<CsvRecord>()
        .map(|record| record?.into_row())
        .collect()
}
