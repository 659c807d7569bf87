//! PostgreSQL-backed export store.

use super::export_store::{ExportStore, ExportStoreError};
use crate::models::ExportRow;
use crate::query::ExportQuery;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::sync::Arc;

/// Export store reading from the `metrics` and `sensors` tables.
///
/// Every fetch opens its own connection and closes it before returning,
/// whether the query succeeded or not. Nothing is pooled between requests.
#[derive(Debug, Clone)]
pub struct PostgresExportStore {
    options: PgConnectOptions,
}

impl PostgresExportStore {
    /// Creates a new store with the given connection options.
    #[must_use]
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    /// Creates a new store wrapped in an Arc.
    #[must_use]
    pub fn new_shared(options: PgConnectOptions) -> Arc<Self> {
        Arc::new(Self::new(options))
    }

    async fn run_query(
        conn: &mut PgConnection,
        query: &ExportQuery,
    ) -> Result<Vec<ExportRow>, sqlx::Error> {
        let sql = query.to_sql();
        let mut statement = sqlx::query_as::<_, ExportRow>(&sql)
            .bind(query.range.start)
            .bind(query.range.end);
        if let Some(sensor) = &query.sensor {
            statement = statement.bind(sensor.as_str());
        }
        statement.fetch_all(conn).await
    }
}

#[async_trait]
impl ExportStore for PostgresExportStore {
    async fn fetch_rows(&self, query: &ExportQuery) -> Result<Vec<ExportRow>, ExportStoreError> {
        let mut conn = self
            .options
            .connect()
            .await
            .map_err(|e| ExportStoreError::Connection(e.to_string()))?;

        let result = Self::run_query(&mut conn, query)
            .await
            .map_err(|e| ExportStoreError::Query(e.to_string()));

        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "Failed to close database connection");
        }

        result
    }
}
