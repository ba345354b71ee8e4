//! # Query Specification
//!
//! Backend-neutral description of a country query: a filter, a
//! projection and an optional result window. Handlers build one of these,
//! stores evaluate it.

pub mod fields;
pub mod filter;
pub mod projection;

pub use fields::{Field, DEFAULT_INCLUDES, VALID_FIELDS};
pub use filter::{to_name_case, CountryFilter, LookupTerm};
pub use projection::Projection;

/// Default page when the request names none
pub const DEFAULT_PAGE: usize = 1;

/// Default page size when the request names none
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound for `limit` unless configured otherwise
pub const MAX_LIMIT: usize = 500;

/// A 1-based page of `limit` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Number of pages needed for `total` rows
    pub fn total_pages(&self, total: usize) -> usize {
        if self.limit == 0 {
            return 0;
        }
        total.div_ceil(self.limit)
    }
}

/// A fully specified country query
#[derive(Debug, Clone, PartialEq)]
pub struct CountryQuery {
    pub filter: CountryFilter,
    pub projection: Projection,
    /// None = every matching row
    pub window: Option<Pagination>,
}

impl CountryQuery {
    pub fn new(filter: CountryFilter) -> Self {
        Self {
            filter,
            projection: Projection::default(),
            window: None,
        }
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn paginate(mut self, window: Pagination) -> Self {
        self.window = Some(window);
        self
    }
}
