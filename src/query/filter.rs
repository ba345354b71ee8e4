//! # Country Filters
//!
//! Row predicates for the lookup endpoints. Normalization of the user
//! supplied value happens once, when the filter is built.

use crate::store::model::Country;

/// Predicate over country rows
#[derive(Debug, Clone, PartialEq)]
pub enum CountryFilter {
    /// No restriction
    All,

    /// Exact match on the common name
    NameCommon(String),

    /// Single code lookup. cca2, cca3 and cioc compare against the
    /// uppercased code, ccn3 against the code as given.
    Code { raw: String, upper: String },

    /// Any of the codes against any code column, ignoring case
    AnyCode(Vec<String>),

    /// Country uses at least one of these currency codes
    CurrencyIn(Vec<String>),

    /// Country speaks at least one of these language codes
    LanguageIn(Vec<String>),

    /// Capital equal to this name once both are name-cased
    Capital(String),
}

impl CountryFilter {
    pub fn name(name: &str) -> Self {
        CountryFilter::NameCommon(name.to_string())
    }

    pub fn code(code: &str) -> Self {
        CountryFilter::Code {
            raw: code.to_string(),
            upper: code.to_uppercase(),
        }
    }

    pub fn any_code<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CountryFilter::AnyCode(codes.into_iter().map(Into::into).collect())
    }

    pub fn capital(name: &str) -> Self {
        CountryFilter::Capital(to_name_case(name))
    }

    /// Check if a country satisfies this filter
    pub fn matches(&self, country: &Country) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::NameCommon(name) => country.name_common == *name,
            CountryFilter::Code { raw, upper } => {
                country.cca2 == *upper
                    || country.cca3 == *upper
                    || country.ccn3.as_deref() == Some(raw.as_str())
                    || country.cioc.as_deref() == Some(upper.as_str())
            }
            CountryFilter::AnyCode(codes) => {
                codes.iter().any(|code| country.has_code_ignore_case(code))
            }
            CountryFilter::CurrencyIn(codes) => {
                codes.iter().any(|code| country.uses_currency(code))
            }
            CountryFilter::LanguageIn(codes) => {
                codes.iter().any(|code| country.speaks_language(code))
            }
            CountryFilter::Capital(name) => country
                .capitals
                .iter()
                .any(|capital| to_name_case(capital) == *name),
        }
    }
}

/// Search term for the currency and language tables: an exact code match
/// or a case-insensitive substring of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTerm {
    code: String,
    needle: String,
}

impl LookupTerm {
    /// Currency codes are stored uppercase (ISO 4217)
    pub fn currency(term: &str) -> Self {
        Self {
            code: term.to_uppercase(),
            needle: term.to_lowercase(),
        }
    }

    /// Language codes are stored lowercase (ISO 639)
    pub fn language(term: &str) -> Self {
        Self {
            code: term.to_lowercase(),
            needle: term.to_lowercase(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn matches(&self, code: &str, name: &str) -> bool {
        code == self.code || name.to_lowercase().contains(&self.needle)
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
/// Runs of whitespace collapse to a single space.
pub fn to_name_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
