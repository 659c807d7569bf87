//! API error type and its HTTP representation.
//!
//! Every failure leaves the handler as a JSON body `{"error": "<message>"}`
//! with a status code matching the variant. Driver-level details are logged
//! and never sent to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::export::CsvExportError;
use shared::query::TimeRangeError;
use shared::storage::ExportStoreError;
use thiserror::Error;

/// Message returned when the database cannot be reached.
pub const CONNECTION_ERROR_MESSAGE: &str = "Database connection error.";

/// Message returned when the export query fails.
pub const QUERY_ERROR_MESSAGE: &str = "Error executing query.";

/// Message returned when the range holds no rows.
pub const NO_DATA_MESSAGE: &str = "No data found for the given time range.";

/// Message returned when the rows cannot be encoded.
pub const ENCODE_ERROR_MESSAGE: &str = "Failed to encode CSV.";

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input is missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The request was valid but matched nothing.
    #[error("{0}")]
    NotFound(String),

    /// The server failed to produce a response.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<TimeRangeError> for ApiError {
    fn from(err: TimeRangeError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ExportStoreError> for ApiError {
    fn from(err: ExportStoreError) -> Self {
        tracing::error!(error = %err, "Export store failure");
        match err {
            ExportStoreError::Connection(_) => Self::Internal(CONNECTION_ERROR_MESSAGE.to_string()),
            ExportStoreError::Query(_)
            | ExportStoreError::LockError
            | ExportStoreError::Validation(_) => Self::Internal(QUERY_ERROR_MESSAGE.to_string()),
        }
    }
}

impl From<CsvExportError> for ApiError {
    fn from(err: CsvExportError) -> Self {
        tracing::error!(error = %err, "CSV encoding failure");
        Self::Internal(ENCODE_ERROR_MESSAGE.to_string())
    }
}
