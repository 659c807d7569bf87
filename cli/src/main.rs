//! Sensor Export CLI
//!
//! Command-line client for the sensor export API.
//!
//! # Usage
//!
//! ```bash
//! sensor-export --help
//! sensor-export health
//! sensor-export download --from 1700000000000 --to 1700003600000 --sensor A
//! ```

#![deny(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use shared::export::{decode_rows, EXPORT_FILE_NAME};
use std::path::{Path, PathBuf};

/// Sensor export CLI - download sensor metrics as CSV
#[derive(Parser)]
#[command(name = "sensor-export")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        short,
        long,
        env = "SENSOR_EXPORT_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API server health
    Health,

    /// Download metrics in a time range as CSV
    Download {
        /// Inclusive start, milliseconds since epoch
        #[arg(long, allow_negative_numbers = true)]
        from: i64,

        /// Inclusive end, milliseconds since epoch
        #[arg(long, allow_negative_numbers = true)]
        to: i64,

        /// Only include rows from this sensor
        #[arg(long)]
        sensor: Option<String>,

        /// Where to write the file
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
    service: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Some(Commands::Health) => health(&client, &cli.api_url),
        Some(Commands::Download {
            from,
            to,
            sensor,
            output,
        }) => download(&client, &cli.api_url, from, to, sensor.as_deref(), &output),
        None => {
            println!("Sensor export CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn health(client: &Client, api_url: &str) -> Result<()> {
    let url = format!("{}/health", api_url.trim_end_matches('/'));
    tracing::debug!(%url, "Checking health");

    let response = client
        .get(&url)
        .send()
        .with_context(|| format!("Failed to reach {url}"))?;
    if !response.status().is_success() {
        bail!("Health check failed with status {}", response.status());
    }

    let body: HealthBody = response.json().context("Invalid health response")?;
    println!("{} {} is {}", body.service, body.version, body.status);
    Ok(())
}

fn download_url(api_url: &str, from: i64, to: i64, sensor: Option<&str>) -> Result<reqwest::Url> {
    let base = format!("{}/download", api_url.trim_end_matches('/'));
    let mut params = vec![("from", from.to_string()), ("to", to.to_string())];
    if let Some(sensor) = sensor {
        params.push(("sensor", sensor.to_string()));
    }
    reqwest::Url::parse_with_params(&base, &params)
        .with_context(|| format!("Invalid API URL {api_url}"))
}

fn download(
    client: &Client,
    api_url: &str,
    from: i64,
    to: i64,
    sensor: Option<&str>,
    output: &Path,
) -> Result<()> {
    let url = download_url(api_url, from, to, sensor)?;
    tracing::debug!(%url, "Requesting export");

    let response = client
        .get(url.clone())
        .send()
        .with_context(|| format!("Failed to reach {url}"))?;

    let status = response.status();
    if status != StatusCode::OK {
        let message = response
            .json::<ErrorBody>()
            .map_or_else(|_| status.to_string(), |body| body.error);
        bail!("Download failed ({status}): {message}");
    }

    let body = response.bytes().context("Failed to read export body")?;
    let rows = decode_rows(&body).context("Server returned a malformed CSV file")?;

    std::fs::write(output, &body)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {} row(s) to {}", rows.len(), output.display());
    Ok(())
}
