//! # Lookup Handlers
//!
//! Endpoint logic independent of the HTTP framework: validate the
//! identifying parameter, build the filter, run the count and data queries,
//! and shape the result.

use std::sync::Arc;

use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::parser::{parse_codes, QueryOptions};
use super::response::{ApiResponse, Envelope, PageMeta};
use crate::observability::MetricsRegistry;
use crate::query::{CountryFilter, CountryQuery, LookupTerm, Projection};
use crate::store::CountryStore;

/// Paginated list of countries
pub type Listing = ApiResponse<Envelope<Vec<Value>>>;

/// A single country
pub type Single = ApiResponse<Value>;

/// Country lookups over a store
pub struct CountryHandler<S: CountryStore> {
    store: Arc<S>,
    metrics: Arc<MetricsRegistry>,
}

impl<S: CountryStore> Clone for CountryHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<S: CountryStore> CountryHandler<S> {
    pub fn new(store: Arc<S>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Every country, paginated
    pub fn all(&self, opts: &QueryOptions) -> ApiResult<Listing> {
        self.list(CountryFilter::All, opts)
    }

    /// Countries whose common name equals `name`
    pub fn by_name(&self, name: Option<&str>, opts: &QueryOptions) -> ApiResult<Listing> {
        let name = required(name, "name")?;
        self.list_or_not_found(CountryFilter::name(name), opts)
    }

    /// The country identified by one cca2, ccn3, cca3 or cioc code
    pub fn by_code(&self, code: Option<&str>, projection: Projection) -> ApiResult<Single> {
        let code = required(code, "code")?;
        self.single(CountryFilter::code(code), projection)
    }

    /// Countries matching any code of a comma separated list
    pub fn by_codes(&self, codes: Option<&str>, opts: &QueryOptions) -> ApiResult<Listing> {
        let codes = parse_codes(required(codes, "code")?);
        if codes.is_empty() {
            return Err(ApiError::MissingParameter("code"));
        }
        self.list_or_not_found(CountryFilter::AnyCode(codes), opts)
    }

    /// Countries using a currency named by code or part of its name
    pub fn by_currency(&self, currency: Option<&str>, opts: &QueryOptions) -> ApiResult<Listing> {
        let term = LookupTerm::currency(required(currency, "currency")?);

        self.metrics.increment_store_queries();
        let currencies = self.store.find_currencies(&term)?;
        if currencies.is_empty() {
            return Err(ApiError::CurrencyNotFound);
        }

        let codes = dedup(currencies.into_iter().map(|c| c.code));
        self.list_or_not_found(CountryFilter::CurrencyIn(codes), opts)
    }

    /// Countries speaking a language named by code or part of its name
    pub fn by_language(&self, language: Option<&str>, opts: &QueryOptions) -> ApiResult<Listing> {
        let term = LookupTerm::language(required(language, "language")?);

        self.metrics.increment_store_queries();
        let languages = self.store.find_languages(&term)?;
        if languages.is_empty() {
            return Err(ApiError::LanguageNotFound);
        }

        let codes = dedup(languages.into_iter().map(|l| l.code));
        self.list_or_not_found(CountryFilter::LanguageIn(codes), opts)
    }

    /// The first country with this capital
    pub fn by_capital(&self, name: Option<&str>, projection: Projection) -> ApiResult<Single> {
        let name = required(name, "capital")?;
        self.single(CountryFilter::capital(name), projection)
    }

    fn list_or_not_found(&self, filter: CountryFilter, opts: &QueryOptions) -> ApiResult<Listing> {
        let listing = self.list(filter, opts)?;
        if listing.body.meta.total == 0 {
            return Err(ApiError::CountryNotFound);
        }
        Ok(listing)
    }

    /// Count query plus data query over the same filter
    fn list(&self, filter: CountryFilter, opts: &QueryOptions) -> ApiResult<Listing> {
        self.metrics.increment_store_queries();
        let total = self.store.count(&filter)?;

        let query = CountryQuery::new(filter)
            .project(opts.projection.clone())
            .paginate(opts.pagination);

        self.metrics.increment_store_queries();
        let rows = self.store.find_many(&query)?;

        let meta = PageMeta::new(total, opts.pagination);
        Ok(ApiResponse::new(
            Envelope::new(meta, rows),
            opts.fields_modified,
        ))
    }

    fn single(&self, filter: CountryFilter, projection: Projection) -> ApiResult<Single> {
        let partial = projection.is_restricted();
        let query = CountryQuery::new(filter).project(projection);

        self.metrics.increment_store_queries();
        let country = self
            .store
            .find_first(&query)?
            .ok_or(ApiError::CountryNotFound)?;

        Ok(ApiResponse::new(country, partial))
    }
}

/// Non-blank parameter value, passed on unchanged
fn required<'a>(value: Option<&'a str>, name: &'static str) -> ApiResult<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::MissingParameter(name))
}

/// Drop repeated codes, keeping first occurrence order
fn dedup(codes: impl Iterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for code in codes {
        if !unique.contains(&code) {
            unique.push(code);
        }
    }
    unique
}
