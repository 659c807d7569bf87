//! API route definitions.
//!
//! This module organizes all HTTP routes for the sensor export server.

mod download;
mod health;

pub use download::download_routes;
pub use health::health_routes;
