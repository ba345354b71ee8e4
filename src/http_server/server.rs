//! # HTTP Server
//!
//! Combines the country routes with health and metrics, applies the
//! middleware stack and serves until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::error_handling::HandleErrorLayer;
use axum::{middleware, BoxError, Router};
use tokio::net::TcpListener;
use tower::timeout::error::Elapsed;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::ServerConfig;
use super::observability_routes::{observability_routes, track_responses, MetricsState};
use crate::observability::MetricsRegistry;
use crate::rest_api::{ApiError, CountryHandler, RestServer};
use crate::store::CountryStore;

/// HTTP server for the countries API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store` with the given configuration
    pub fn with_config<S: CountryStore + 'static>(config: ServerConfig, store: Arc<S>) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let router = Self::build_router(&config, store, metrics);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: CountryStore + 'static>(
        config: &ServerConfig,
        store: Arc<S>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let metrics_state = Arc::new(MetricsState {
            metrics: Arc::clone(&metrics),
            dataset: store.stats(),
        });
        let handler = CountryHandler::new(store, Arc::clone(&metrics));
        let countries = RestServer::new(handler, config.page_limits());

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            // ServerConfig::validate rejects origins that do not parse
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let router = Router::new()
            .merge(observability_routes(metrics_state))
            .merge(countries.router())
            .fallback(|| async { ApiError::RouteNotFound });

        with_layers(router, config, metrics).layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until ctrl-c or SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "countries API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Timeout innermost, then response metrics, so a timed out request is
/// still classified.
fn with_layers(router: Router, config: &ServerConfig, metrics: Arc<MetricsRegistry>) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(config.request_timeout()),
        )
        .layer(middleware::from_fn_with_state(metrics, track_responses))
        .layer(TraceLayer::new_for_http())
}

/// Map middleware errors to the JSON error body
async fn handle_timeout(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use std::time::Duration;
    use tower::ServiceExt;

    fn server(config: ServerConfig) -> HttpServer {
        HttpServer::with_config(config, Arc::new(InMemoryStore::default()))
    }

    #[test]
    fn test_server_creation() {
        let server = server(ServerConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = server(ServerConfig::with_port(8080));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_elapsed_maps_to_timeout() {
        let err = handle_timeout(Box::new(Elapsed::new())).await;
        assert_eq!(err, ApiError::Timeout);

        let other = handle_timeout("broken pipe".into()).await;
        assert!(matches!(other, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_timed_out_request_is_json_and_counted() {
        let config = ServerConfig {
            request_timeout_secs: 1,
            ..Default::default()
        };
        let metrics = Arc::new(MetricsRegistry::new());
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        );
        let app = with_layers(slow, &config, Arc::clone(&metrics));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Request timed out.");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 1);
        assert_eq!(snapshot.client_errors, 1);
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = ServerConfig {
            cors_origins: vec!["https://example.org".to_string()],
            ..Default::default()
        };
        let _router = server(config).router();
    }
}
