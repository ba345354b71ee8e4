//! countries-api - read-only REST API over world country reference data
//!
//! The dataset is loaded once at startup into an immutable in-memory store
//! and served through Axum.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod rest_api;
pub mod store;
