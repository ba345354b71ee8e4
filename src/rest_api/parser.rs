//! # Query Parameter Parser
//!
//! Turns the raw `fields`, `page` and `limit` parameters into a projection
//! and a result window.

use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use crate::query::{Field, Pagination, Projection, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

/// Query string as received. Everything stays a string until parsed here
/// so malformed numbers produce our own error body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuery {
    pub fields: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Comma separated codes for the batch alpha lookup
    pub code: Option<String>,
}

/// Page size bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Parsed options shared by the list endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub projection: Projection,
    pub pagination: Pagination,
    /// Set when the client restricted the representation
    pub fields_modified: bool,
}

impl QueryOptions {
    /// Parse projection and pagination from a raw query
    pub fn parse(raw: &RawQuery, limits: &PageLimits) -> ApiResult<Self> {
        let projection = parse_fields(raw.fields.as_deref())?;
        let pagination = Pagination::new(
            parse_page(raw.page.as_deref())?,
            parse_limit(raw.limit.as_deref(), limits)?,
        );

        Ok(Self {
            fields_modified: projection.is_restricted(),
            projection,
            pagination,
        })
    }
}

/// Parse the `fields` parameter (comma-separated field list).
///
/// Absent or empty means the default include set. Unknown names are
/// dropped; if nothing valid remains the request is rejected.
pub fn parse_fields(value: Option<&str>) -> ApiResult<Projection> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(Projection::default()),
    };

    let mut selected: Vec<Field> = Vec::new();
    for field in value.split(',').filter_map(|s| s.trim().parse::<Field>().ok()) {
        if !selected.contains(&field) {
            selected.push(field);
        }
    }

    if selected.is_empty() {
        return Err(ApiError::InvalidFields);
    }

    Ok(Projection::Select(selected))
}

/// Parse page parameter (1-based)
fn parse_page(value: Option<&str>) -> ApiResult<usize> {
    let Some(value) = value else {
        return Ok(DEFAULT_PAGE);
    };

    match value.trim().parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ApiError::InvalidParameter(format!(
            "page must be a positive integer, got '{}'",
            value
        ))),
    }
}

/// Parse limit parameter
fn parse_limit(value: Option<&str>, limits: &PageLimits) -> ApiResult<usize> {
    let Some(value) = value else {
        return Ok(limits.default_limit);
    };

    match value.trim().parse::<usize>() {
        Ok(limit) if (1..=limits.max_limit).contains(&limit) => Ok(limit),
        _ => Err(ApiError::InvalidParameter(format!(
            "limit must be an integer between 1 and {}, got '{}'",
            limits.max_limit, value
        ))),
    }
}

/// Split a comma separated code list, dropping blanks
pub fn parse_codes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
