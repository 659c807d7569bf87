//! Common test utilities and helpers for integration tests.
//!
//! Provides app setup over a seeded in-memory store, a store that always
//! fails, and HTTP request helpers.

use api::{create_router, AppState};
use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shared::chrono::{DateTime, TimeZone, Utc};
use shared::models::{ExportRow, Metric, Sensor};
use shared::query::ExportQuery;
use shared::storage::{ExportStore, ExportStoreError, InMemoryExportStore};
use std::sync::Arc;

/// Converts epoch milliseconds to a timestamp.
pub fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

/// Creates a test router over an empty in-memory store.
///
/// # Returns
///
/// A tuple containing the configured router and the store, for seeding.
pub fn test_app() -> (Router, Arc<InMemoryExportStore>) {
    let store = InMemoryExportStore::new_shared();
    let router = create_router(AppState::new(store.clone()));
    (router, store)
}

/// Creates a test router over a store holding the reference data set:
///
/// | sensor | data  | time (ms)       |
/// |--------|-------|-----------------|
/// | A      | 12.5  | 1700001000000   |
/// | B      | 7.0   | 1700002000000   |
/// | A      | 13.25 | 1700002500000   |
/// | (none) | 99    | 1700003000000   |
/// | B      | 8.0   | 1700009000000   |
pub fn seeded_app() -> (Router, Arc<InMemoryExportStore>) {
    let (router, store) = test_app();
    store.insert_sensor(Sensor::new(1, "A")).unwrap();
    store.insert_sensor(Sensor::new(2, "B")).unwrap();
    store
        .insert_metrics(vec![
            Metric::new(2, json!(8.0), at(1_700_009_000_000)),
            Metric::new(1, json!(13.25), at(1_700_002_500_000)),
            Metric::new(2, json!(7.0), at(1_700_002_000_000)),
            Metric::new(1, json!(12.5), at(1_700_001_000_000)),
            Metric::new(42, json!(99), at(1_700_003_000_000)),
        ])
        .unwrap();
    (router, store)
}

/// A store whose every fetch fails with the given error kind.
pub struct FailingExportStore {
    connection: bool,
}

impl FailingExportStore {
    /// A store that cannot connect.
    pub fn unreachable() -> Self {
        Self { connection: true }
    }

    /// A store that connects but whose queries fail.
    pub fn broken_query() -> Self {
        Self { connection: false }
    }
}

#[async_trait]
impl ExportStore for FailingExportStore {
    async fn fetch_rows(&self, _query: &ExportQuery) -> Result<Vec<ExportRow>, ExportStoreError> {
        if self.connection {
            Err(ExportStoreError::Connection(
                "connection refused (os error 111)".to_string(),
            ))
        } else {
            Err(ExportStoreError::Query(
                "column m.data does not exist".to_string(),
            ))
        }
    }
}

/// Creates a test router over the given failing store.
pub fn failing_app(store: FailingExportStore) -> Router {
    create_router(AppState::new(Arc::new(store)))
}

/// Helper to make a GET request and return the raw response parts.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to GET from
///
/// # Returns
///
/// A tuple containing the status code, headers and body bytes.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, headers, body)
}

/// Helper to make a GET request and parse a JSON response.
///
/// # Returns
///
/// A tuple containing the status code and parsed JSON body (`Null` if the body
/// is not JSON).
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _headers, body) = get_raw(app, uri).await;
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
