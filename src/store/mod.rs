//! # Country Store
//!
//! The data access seam. Handlers talk to a [`CountryStore`]; the bundled
//! [`InMemoryStore`] serves an immutable dataset loaded at startup.

pub mod errors;
pub mod loader;
pub mod memory;
pub mod model;

pub use errors::{StoreError, StoreResult};
pub use loader::{Dataset, Tables};
pub use memory::InMemoryStore;
pub use model::{Country, Currency, Language};

use serde::Serialize;
use serde_json::Value;

use crate::query::{CountryFilter, CountryQuery, LookupTerm};

/// Read-only access to the reference data
pub trait CountryStore: Send + Sync {
    /// Count countries matching a filter
    fn count(&self, filter: &CountryFilter) -> StoreResult<usize>;

    /// Fetch the projected rows of a query, in id order
    fn find_many(&self, query: &CountryQuery) -> StoreResult<Vec<Value>>;

    /// Fetch the first projected row of a query
    fn find_first(&self, query: &CountryQuery) -> StoreResult<Option<Value>>;

    /// Currencies whose code or name matches the term
    fn find_currencies(&self, term: &LookupTerm) -> StoreResult<Vec<Currency>>;

    /// Languages whose code or name matches the term
    fn find_languages(&self, term: &LookupTerm) -> StoreResult<Vec<Language>>;

    /// Table sizes
    fn stats(&self) -> StoreStats;
}

/// Row counts of the store's tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub countries: usize,
    pub currencies: usize,
    pub languages: usize,
}
