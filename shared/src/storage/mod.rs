//! Storage traits and implementations.
//!
//! The `ExportStore` trait abstracts the one read the service performs:
//! fetching the export rows for a query. `PostgresExportStore` talks to the
//! relational store; `InMemoryExportStore` evaluates the same join semantics
//! over local data for development and testing.

pub mod export_store;
pub mod postgres_store;

pub use export_store::{ExportStore, ExportStoreError, InMemoryExportStore, SeedData};
pub use postgres_store::PostgresExportStore;
