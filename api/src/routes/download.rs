//! CSV download endpoint.
//!
//! `GET /download?from=<ms>&to=<ms>[&sensor=<name>]` returns every metric in
//! the inclusive range, joined with its sensor name and ordered by time, as a
//! `sensor_data.csv` attachment.

use crate::error::{ApiError, NO_DATA_MESSAGE};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use shared::export::{encode_rows, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use shared::query::{ExportQuery, TimeRange};

/// Raw query parameters.
///
/// Bounds are kept as strings so that missing and malformed values can be
/// told apart and reported with their own messages.
#[derive(Debug, Default)]
pub struct DownloadParams {
    /// Inclusive lower bound, milliseconds since epoch.
    pub from: Option<String>,
    /// Inclusive upper bound, milliseconds since epoch.
    pub to: Option<String>,
    /// Exact sensor name filter.
    pub sensor: Option<String>,
}

impl DownloadParams {
    /// Collects the known parameters from decoded query pairs.
    ///
    /// When a key is repeated the first value is used; unknown keys are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "from" => &mut params.from,
                "to" => &mut params.to,
                "sensor" => &mut params.sensor,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    fn into_query(self) -> Result<ExportQuery, ApiError> {
        let range = TimeRange::parse(self.from.as_deref(), self.to.as_deref())?;
        let query = ExportQuery::new(range);
        Ok(match self.sensor {
            Some(sensor) => query.with_sensor(sensor),
            None => query,
        })
    }
}

/// Creates the download routes.
pub fn download_routes(state: AppState) -> Router {
    Router::new()
        .route("/download", get(download))
        .with_state(state)
}

async fn download(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(pairs) = pairs.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let params = DownloadParams::from_pairs(pairs);

    let query = params.into_query().inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected download request");
    })?;

    tracing::debug!(
        sql = %query.to_sql(),
        from = %query.range.start,
        to = %query.range.end,
        sensor = ?query.sensor,
        "Executing export query"
    );

    let rows = state.export_store().fetch_rows(&query).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound(NO_DATA_MESSAGE.to_string()));
    }

    let body = encode_rows(&rows)?;

    tracing::info!(rows = rows.len(), bytes = body.len(), "Export ready");

    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
