//! # Country Data Model
//!
//! Read-only records mirroring the reference dataset. Every one-to-many
//! relation is a `Vec` so that an absent relation serializes as `[]`.

use serde::{Deserialize, Serialize};

/// A country row with all of its relations attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name_common: String,
    pub name_official: String,

    pub cca2: String,
    #[serde(default)]
    pub ccn3: Option<String>,
    pub cca3: String,
    #[serde(default)]
    pub cioc: Option<String>,
    #[serde(default)]
    pub fifa: Option<String>,

    #[serde(default)]
    pub independent: Option<bool>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub un_member: bool,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub landlocked: bool,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub population: u64,

    #[serde(default)]
    pub alt_spellings: Vec<String>,
    /// cca3 codes of neighbouring countries
    #[serde(default)]
    pub borders: Vec<String>,
    /// cca3 codes of countries listing this one as a border.
    /// Computed at load time, never read from the dataset.
    #[serde(default, skip_deserializing)]
    pub bordered_by: Vec<String>,
    #[serde(default)]
    pub capitals: Vec<String>,
    #[serde(default)]
    pub car: Vec<Car>,
    #[serde(default)]
    pub continents: Vec<String>,
    #[serde(default)]
    pub currencies: Vec<Currency>,
    #[serde(default)]
    pub demonyms: Vec<Demonym>,
    #[serde(default)]
    pub flags: Vec<FlagImage>,
    #[serde(default)]
    pub gini: Vec<Gini>,
    #[serde(default)]
    pub idd: Vec<Idd>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub latlng: Vec<LatLng>,
    #[serde(default)]
    pub maps: Vec<Maps>,
    #[serde(default)]
    pub native_names: Vec<NativeName>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl Country {
    /// True if `code` names this country by cca2, ccn3, cca3 or cioc,
    /// ignoring ASCII case.
    pub fn has_code_ignore_case(&self, code: &str) -> bool {
        self.cca2.eq_ignore_ascii_case(code)
            || self.cca3.eq_ignore_ascii_case(code)
            || opt_eq_ignore_case(&self.ccn3, code)
            || opt_eq_ignore_case(&self.cioc, code)
    }

    pub fn uses_currency(&self, code: &str) -> bool {
        self.currencies.iter().any(|c| c.code == code)
    }

    pub fn speaks_language(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l.code == code)
    }
}

fn opt_eq_ignore_case(field: &Option<String>, code: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|value| value.eq_ignore_ascii_case(code))
}

/// ISO 4217 currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// ISO 639 language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    #[serde(default)]
    pub signs: Vec<String>,
    pub side: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demonym {
    pub lang: String,
    #[serde(default)]
    pub f: Option<String>,
    #[serde(default)]
    pub m: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagImage {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Gini coefficient for one survey year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gini {
    pub year: i32,
    pub value: f64,
}

/// International direct dialing prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idd {
    pub root: String,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maps {
    #[serde(default)]
    pub google_maps: Option<String>,
    #[serde(default)]
    pub open_street_maps: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeName {
    pub lang: String,
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub lang: String,
    pub common: String,
    pub official: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Country {
        serde_json::from_value(json!({
            "id": 1,
            "name_common": "Germany",
            "name_official": "Federal Republic of Germany",
            "cca2": "DE",
            "ccn3": "276",
            "cca3": "DEU",
            "cioc": "GER"
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_relations_default_to_empty() {
        let country = minimal();
        assert!(country.currencies.is_empty());
        assert!(country.capitals.is_empty());

        let value = serde_json::to_value(&country).unwrap();
        assert_eq!(value["timezones"], json!([]));
        assert_eq!(value["fifa"], json!(null));
    }

    #[test]
    fn test_bordered_by_is_not_read_from_input() {
        let country: Country = serde_json::from_value(json!({
            "id": 1,
            "name_common": "X",
            "name_official": "X",
            "cca2": "XX",
            "cca3": "XXX",
            "bordered_by": ["YYY"]
        }))
        .unwrap();
        assert!(country.bordered_by.is_empty());
    }

    #[test]
    fn test_has_code_ignore_case() {
        let country = minimal();
        assert!(country.has_code_ignore_case("de"));
        assert!(country.has_code_ignore_case("deu"));
        assert!(country.has_code_ignore_case("276"));
        assert!(country.has_code_ignore_case("ger"));
        assert!(!country.has_code_ignore_case("fr"));
    }
}
