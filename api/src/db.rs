//! Database connection module for PostgreSQL.
//!
//! Connection parameters are read once at startup into a [`DatabaseConfig`]
//! and handed to the export store, which opens one connection per request.

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::fmt;

/// Database configuration loaded from environment variables.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database server host name or address.
    pub host: String,
    /// Database server port.
    pub port: u16,
    /// Database name to use.
    pub database: String,
    /// Username for authentication.
    pub user: String,
    /// Password for authentication.
    pub password: String,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SENSOR_EXPORT_DB_HOST`: Database host (default: "localhost")
    /// - `SENSOR_EXPORT_DB_PORT`: Database port (default: 5432)
    /// - `SENSOR_EXPORT_DB_NAME`: Database name (default: "sensors")
    /// - `SENSOR_EXPORT_DB_USER`: Database user (default: "postgres")
    /// - `SENSOR_EXPORT_DB_PASSWORD`: Database password (default: empty)
    ///
    /// # Errors
    ///
    /// Returns an error if `SENSOR_EXPORT_DB_PORT` is set but is not a valid port.
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("SENSOR_EXPORT_DB_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("SENSOR_EXPORT_DB_PORT is not a valid port number")?
            .unwrap_or(5432);

        Ok(Self {
            host: std::env::var("SENSOR_EXPORT_DB_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            port,
            database: std::env::var("SENSOR_EXPORT_DB_NAME")
                .unwrap_or_else(|_| "sensors".to_string()),
            user: std::env::var("SENSOR_EXPORT_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("SENSOR_EXPORT_DB_PASSWORD").unwrap_or_default(),
        })
    }

    /// Builds the driver connection options.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }

    /// Test database connectivity by opening and closing one connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn ping(&self) -> Result<()> {
        let conn: PgConnection = self
            .connect_options()
            .connect()
            .await
            .context("Failed to connect to database")?;
        conn.close().await.context("Failed to close database connection")?;
        Ok(())
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
