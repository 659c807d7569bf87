//! Sensor Export API Server
//!
//! This crate provides the HTTP server that turns a time range of sensor
//! metrics into a downloadable CSV file.
//!
//! # Architecture
//!
//! The server is built on Axum and Tokio and exposes:
//! - `GET /download` - CSV export of metrics in an inclusive millisecond range,
//!   optionally filtered to one sensor
//! - `GET /health` - liveness check
//!
//! Rows come from an [`ExportStore`](shared::storage::ExportStore). In
//! production that is PostgreSQL, reached through one short-lived connection
//! per request.
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
pub mod db;
pub mod error;
mod routes;
mod state;

pub use config::{Config, StoreBackend};
pub use db::DatabaseConfig;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Runs the sensor export API server.
///
/// Server and store configuration are read from environment variables.
/// Shuts down gracefully on SIGTERM/SIGINT.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;

    let state = match &config.store {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;

            tracing::info!(
                db_host = %db_config.host,
                db_port = db_config.port,
                db_name = %db_config.database,
                "Using PostgreSQL export store"
            );

            // Requests open their own connections, so an unreachable database only
            // degrades /download and is not fatal at startup.
            if let Err(e) = db_config.ping().await {
                tracing::warn!(error = %e, "Database is not reachable at startup");
            }

            AppState::with_postgres(&db_config)
        }
        StoreBackend::InMemory { seed_file } => {
            tracing::warn!("Using in-memory export store; intended for development only");
            AppState::with_seed_file(seed_file.as_deref())?
        }
    };

    run_server_with_config(config, state).await
}

/// Runs the server with the provided configuration and state.
///
/// This is useful for testing or when you want to provide configuration programmatically.
///
/// # Errors
///
/// Returns an error if:
/// - The configured address is invalid
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config, state: AppState) -> Result<()> {
    let addr = config.socket_addr()?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Sensor export API server starting"
    );

    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::download_routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
