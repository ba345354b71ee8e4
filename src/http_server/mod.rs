//! # HTTP Server Module
//!
//! Serves the country API over Axum.
//!
//! # Endpoints
//!
//! - `/all`, `/alpha`, `/alpha/:code`, `/name/:name`, `/currency/:currency`,
//!   `/lang/:language`, `/capital/:name` - country lookups
//! - `/health` - Health check
//! - `/metrics` - Request counters and dataset size

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::HttpServer;
