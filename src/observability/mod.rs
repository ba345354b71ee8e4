//! Observability: structured logging and request metrics
//!
//! Logging goes through `tracing`; call [`init_logging`] once at startup.
//! [`MetricsRegistry`] holds the counters served at `/metrics`.

mod logging;
mod metrics;

pub use logging::{init_logging, LogConfig};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
