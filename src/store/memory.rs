//! # In-Memory Store
//!
//! Serves the dataset straight from memory. The tables never change after
//! construction, so reads need no locking.

use std::path::Path;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::loader::{Dataset, Tables};
use super::model::{Country, Currency, Language};
use super::{CountryStore, StoreStats};
use crate::query::{CountryFilter, CountryQuery, LookupTerm};

/// Immutable in-memory country store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Tables,
}

impl InMemoryStore {
    /// Build from a parsed dataset
    pub fn from_dataset(dataset: Dataset) -> StoreResult<Self> {
        Ok(Self {
            tables: dataset.into_tables()?,
        })
    }

    /// Load and validate a dataset file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let store = Self::from_dataset(Dataset::load(path)?)?;
        let stats = store.stats();
        tracing::info!(
            path = %path.display(),
            countries = stats.countries,
            currencies = stats.currencies,
            languages = stats.languages,
            "dataset loaded"
        );
        Ok(store)
    }

    fn matching<'a>(&'a self, filter: &'a CountryFilter) -> impl Iterator<Item = &'a Country> + 'a {
        self.tables
            .countries
            .iter()
            .filter(move |country| filter.matches(country))
    }
}

impl CountryStore for InMemoryStore {
    fn count(&self, filter: &CountryFilter) -> StoreResult<usize> {
        Ok(self.matching(filter).count())
    }

    fn find_many(&self, query: &CountryQuery) -> StoreResult<Vec<Value>> {
        let (skip, take) = match query.window {
            Some(window) => (window.offset(), window.limit),
            None => (0, usize::MAX),
        };

        self.matching(&query.filter)
            .skip(skip)
            .take(take)
            .map(|country| query.projection.apply(country))
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    fn find_first(&self, query: &CountryQuery) -> StoreResult<Option<Value>> {
        self.matching(&query.filter)
            .next()
            .map(|country| query.projection.apply(country))
            .transpose()
            .map_err(StoreError::from)
    }

    fn find_currencies(&self, term: &LookupTerm) -> StoreResult<Vec<Currency>> {
        Ok(self
            .tables
            .currencies
            .iter()
            .filter(|c| term.matches(&c.code, &c.name))
            .cloned()
            .collect())
    }

    fn find_languages(&self, term: &LookupTerm) -> StoreResult<Vec<Language>> {
        Ok(self
            .tables
            .languages
            .iter()
            .filter(|l| term.matches(&l.code, &l.name))
            .cloned()
            .collect())
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            countries: self.tables.countries.len(),
            currencies: self.tables.currencies.len(),
            languages: self.tables.languages.len(),
        }
    }
}
