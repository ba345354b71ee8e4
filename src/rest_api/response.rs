//! # Response Formatting
//!
//! Success envelope for the list endpoints and the 200/206 status rule.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::query::Pagination;

/// Pagination metadata over the filtered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

impl PageMeta {
    pub fn new(total: usize, pagination: Pagination) -> Self {
        Self {
            total,
            page: pagination.page,
            limit: pagination.limit,
            total_pages: pagination.total_pages(total),
        }
    }
}

/// List response with pagination
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub meta: PageMeta,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(meta: PageMeta, data: T) -> Self {
        Self { meta, data }
    }
}

/// A success body plus whether it is a partial representation.
/// Partial bodies are sent as 206.
#[derive(Debug, Clone)]
pub struct ApiResponse<T: Serialize> {
    pub body: T,
    pub partial: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(body: T, partial: bool) -> Self {
        Self { body, partial }
    }

    pub fn status(&self) -> StatusCode {
        if self.partial {
            StatusCode::PARTIAL_CONTENT
        } else {
            StatusCode::OK
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body)).into_response()
    }
}
