//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which export store the server reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL, configured through [`DatabaseConfig`](crate::DatabaseConfig).
    #[default]
    Postgres,
    /// Local in-memory store for development, optionally seeded from a JSON file.
    InMemory {
        /// Path to a JSON seed file.
        seed_file: Option<PathBuf>,
    },
}

impl StoreBackend {
    /// Resolves the backend from the raw `SENSOR_EXPORT_STORE` and
    /// `SENSOR_EXPORT_SEED_FILE` values.
    ///
    /// # Errors
    ///
    /// Returns an error if the store kind is not `postgres` or `memory`.
    pub fn parse(kind: Option<&str>, seed_file: Option<String>) -> Result<Self> {
        match kind.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            None | Some("" | "postgres") => Ok(Self::Postgres),
            Some("memory") => Ok(Self::InMemory {
                seed_file: seed_file.filter(|f| !f.is_empty()).map(PathBuf::from),
            }),
            Some(other) => bail!("SENSOR_EXPORT_STORE must be 'postgres' or 'memory', got '{other}'"),
        }
    }
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `SENSOR_EXPORT_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `SENSOR_EXPORT_PORT`: The port to listen on (default: 8080)
/// - `SENSOR_EXPORT_STORE`: `postgres` (default) or `memory`
/// - `SENSOR_EXPORT_SEED_FILE`: JSON seed for the `memory` store (optional)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// The export store backend.
    pub store: StoreBackend,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SENSOR_EXPORT_PORT` is set but cannot be parsed as a valid port number
    /// - `SENSOR_EXPORT_STORE` names an unknown backend
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("SENSOR_EXPORT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("SENSOR_EXPORT_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("SENSOR_EXPORT_PORT is not a valid port number")?
            .unwrap_or(8080);

        let store = StoreBackend::parse(
            std::env::var("SENSOR_EXPORT_STORE").ok().as_deref(),
            std::env::var("SENSOR_EXPORT_SEED_FILE").ok(),
        )?;

        Ok(Self { host, port, store })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port combination is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store: StoreBackend::default(),
        }
    }
}
