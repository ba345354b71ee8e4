//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Operational counters for the HTTP surface
///
/// # Thread Safety
///
/// All counters use atomic operations with Relaxed ordering; a snapshot
/// is not a consistent cut across counters.
#[derive(Debug)]
pub struct MetricsRegistry {
    started_at: DateTime<Utc>,
    /// Requests received
    requests: AtomicU64,
    /// 200 responses
    ok_responses: AtomicU64,
    /// 206 responses (restricted field projection)
    partial_responses: AtomicU64,
    /// 4xx responses other than 404
    client_errors: AtomicU64,
    /// 404 responses
    not_found: AtomicU64,
    /// 5xx responses
    server_errors: AtomicU64,
    /// Queries sent to the data store
    store_queries: AtomicU64,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            requests: AtomicU64::new(0),
            ok_responses: AtomicU64::new(0),
            partial_responses: AtomicU64::new(0),
            client_errors: AtomicU64::new(0),
            not_found: AtomicU64::new(0),
            server_errors: AtomicU64::new(0),
            store_queries: AtomicU64::new(0),
        }
    }
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_queries(&self) {
        self.store_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Classify a finished response
    pub fn record_status(&self, status: StatusCode) {
        let counter = match status {
            StatusCode::PARTIAL_CONTENT => &self.partial_responses,
            StatusCode::NOT_FOUND => &self.not_found,
            s if s.is_success() => &self.ok_responses,
            s if s.is_client_error() => &self.client_errors,
            s if s.is_server_error() => &self.server_errors,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let now = Utc::now();
        MetricsSnapshot {
            started_at: self.started_at.to_rfc3339(),
            uptime_secs: (now - self.started_at).num_seconds().max(0) as u64,
            requests: self.requests.load(Ordering::Relaxed),
            ok_responses: self.ok_responses.load(Ordering::Relaxed),
            partial_responses: self.partial_responses.load(Ordering::Relaxed),
            client_errors: self.client_errors.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            server_errors: self.server_errors.load(Ordering::Relaxed),
            store_queries: self.store_queries.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub started_at: String,
    pub uptime_secs: u64,
    pub requests: u64,
    pub ok_responses: u64,
    pub partial_responses: u64,
    pub client_errors: u64,
    pub not_found: u64,
    pub server_errors: u64,
    pub store_queries: u64,
}
