//! # REST API Errors
//!
//! Every failure renders as a flat `{"error": "<message>"}` body with the
//! matching HTTP status.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Public message for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// REST API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Required path or query parameter absent or blank
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// `fields` named nothing from the registry
    #[error("Invalid fields requested.")]
    InvalidFields,

    /// Malformed or out of range query parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Country not found.")]
    CountryNotFound,

    #[error("Currency not found.")]
    CurrencyNotFound,

    #[error("Language not found.")]
    LanguageNotFound,

    /// No route matched the request path
    #[error("Route not found.")]
    RouteNotFound,

    /// Request exceeded the configured timeout
    #[error("Request timed out.")]
    Timeout,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Data store or runtime failure. The cause is logged, never returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidFields => StatusCode::BAD_REQUEST,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,

            ApiError::CountryNotFound => StatusCode::NOT_FOUND,
            ApiError::CurrencyNotFound => StatusCode::NOT_FOUND,
            ApiError::LanguageNotFound => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidParameter(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidParameter(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
