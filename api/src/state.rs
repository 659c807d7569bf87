//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::db::DatabaseConfig;
use anyhow::{Context, Result};
use shared::storage::{ExportStore, InMemoryExportStore, PostgresExportStore, SeedData};
use std::path::Path;
use std::sync::Arc;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The export row source.
    export_store: Arc<dyn ExportStore>,
}

impl AppState {
    /// Creates a new application state with the given store.
    pub fn new(export_store: Arc<dyn ExportStore>) -> Self {
        Self { export_store }
    }

    /// Creates a new application state backed by PostgreSQL.
    #[must_use]
    pub fn with_postgres(config: &DatabaseConfig) -> Self {
        Self::new(PostgresExportStore::new_shared(config.connect_options()))
    }

    /// Creates a new application state with an in-memory store, loaded from
    /// a JSON seed file when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid sensor.
    pub fn with_seed_file(seed_file: Option<&Path>) -> Result<Self> {
        let seed = match seed_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read seed file {}", path.display()))?;
                serde_json::from_str::<SeedData>(&text)
                    .with_context(|| format!("Invalid seed file {}", path.display()))?
            }
            None => SeedData::default(),
        };

        let store = InMemoryExportStore::from_seed(seed)?;
        tracing::info!(metrics = store.metric_count()?, "In-memory export store ready");
        Ok(Self::new(Arc::new(store)))
    }

    /// Returns a reference to the export store.
    #[must_use]
    pub fn export_store(&self) -> &dyn ExportStore {
        self.export_store.as_ref()
    }
}
