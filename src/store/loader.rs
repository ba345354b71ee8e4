//! # Dataset Loader
//!
//! Reads the reference dataset from a JSON file:
//!
//! ```json
//! { "countries": [...], "currencies": [...], "languages": [...] }
//! ```
//!
//! `currencies` and `languages` are optional standalone tables. Records
//! attached to countries are merged in, so every code a country uses
//! resolves.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::{StoreError, StoreResult};
use super::model::{Country, Currency, Language};

/// Raw dataset as stored on disk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    pub countries: Vec<Country>,
    #[serde(default)]
    pub currencies: Vec<Currency>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

impl Dataset {
    /// Load a dataset file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Parse a dataset from JSON text
    pub fn from_json(content: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate and normalize into the form the in-memory store serves:
    /// rows ordered by id, identifiers unique, `bordered_by` filled in,
    /// currency and language tables complete and ordered by code.
    pub fn into_tables(self) -> StoreResult<Tables> {
        let Dataset {
            mut countries,
            currencies,
            languages,
        } = self;

        check_unique(&countries)?;
        countries.sort_by_key(|c| c.id);
        link_reverse_borders(&mut countries);

        let currencies = merge_by_code(
            currencies,
            countries.iter().flat_map(|c| c.currencies.iter().cloned()),
            |c| c.code.clone(),
        );
        let languages = merge_by_code(
            languages,
            countries.iter().flat_map(|c| c.languages.iter().cloned()),
            |l| l.code.clone(),
        );

        Ok(Tables {
            countries,
            currencies,
            languages,
        })
    }
}

/// Normalized tables
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub countries: Vec<Country>,
    pub currencies: Vec<Currency>,
    pub languages: Vec<Language>,
}

fn check_unique(countries: &[Country]) -> StoreResult<()> {
    let mut ids = HashSet::new();
    let mut cca2 = HashSet::new();
    let mut cca3 = HashSet::new();

    for country in countries {
        if !ids.insert(country.id) {
            return Err(StoreError::Duplicate {
                column: "id",
                value: country.id.to_string(),
            });
        }
        if !country.cca2.is_empty() && !cca2.insert(country.cca2.to_uppercase()) {
            return Err(StoreError::Duplicate {
                column: "cca2",
                value: country.cca2.clone(),
            });
        }
        if !country.cca3.is_empty() && !cca3.insert(country.cca3.to_uppercase()) {
            return Err(StoreError::Duplicate {
                column: "cca3",
                value: country.cca3.clone(),
            });
        }
    }
    Ok(())
}

/// Fill `bordered_by` from every other country's `borders`
fn link_reverse_borders(countries: &mut [Country]) {
    let index: HashMap<String, usize> = countries
        .iter()
        .enumerate()
        .map(|(i, c)| (c.cca3.to_uppercase(), i))
        .collect();

    let edges: Vec<(usize, String)> = countries
        .iter()
        .flat_map(|c| {
            c.borders
                .iter()
                .map(move |border| (border.to_uppercase(), c.cca3.clone()))
        })
        .filter_map(|(border, from)| match index.get(&border) {
            Some(&target) => Some((target, from)),
            None => {
                tracing::warn!(border = %border, country = %from, "border references unknown country");
                None
            }
        })
        .collect();

    for country in countries.iter_mut() {
        country.bordered_by.clear();
    }
    for (target, from) in edges {
        countries[target].bordered_by.push(from);
    }
}

/// Union of explicit rows and rows found on countries, keyed by code.
/// Explicit rows win; the result is ordered by code.
fn merge_by_code<T, I, F>(explicit: Vec<T>, attached: I, key: F) -> Vec<T>
where
    I: Iterator<Item = T>,
    F: Fn(&T) -> String,
{
    let mut table = BTreeMap::new();
    for row in attached {
        table.entry(key(&row)).or_insert(row);
    }
    for row in explicit {
        table.insert(key(&row), row);
    }
    table.into_values().collect()
}
