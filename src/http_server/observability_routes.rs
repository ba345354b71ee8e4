//! Observability HTTP Routes
//!
//! Health check and metrics snapshot.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::observability::{MetricsRegistry, MetricsSnapshot};
use crate::store::StoreStats;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Metrics response: counters plus dataset size
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    pub dataset: StoreStats,
}

/// State for the metrics endpoint
pub struct MetricsState {
    pub metrics: Arc<MetricsRegistry>,
    pub dataset: StoreStats,
}

/// Create observability routes
pub fn observability_routes(state: Arc<MetricsState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Metrics handler - returns metrics as JSON
async fn metrics_handler(State(state): State<Arc<MetricsState>>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        counters: state.metrics.snapshot(),
        dataset: state.dataset,
    })
}

/// Middleware counting every request and classifying its response
pub async fn track_responses(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    metrics.increment_requests();
    let response = next.run(request).await;
    metrics.record_status(response.status());
    response
}
