//! Liveness endpoint.
//!
//! Answers without touching the database so that a load balancer can tell a
//! running process apart from a reachable store.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "sensor-export-api";

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the process answers.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
}

/// Creates the health check routes.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
