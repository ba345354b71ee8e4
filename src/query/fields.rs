//! # Field & Include Registry
//!
//! Static whitelist of fields a client may request with `?fields=`, and the
//! relations attached to every country when no field list is given.

use std::fmt;
use std::str::FromStr;

/// A field of the country representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    NameCommon,
    NameOfficial,
    Cca2,
    Ccn3,
    Cca3,
    Cioc,
    Fifa,
    Independent,
    Status,
    UnMember,
    Region,
    Subregion,
    Landlocked,
    Area,
    Flag,
    Population,
    AltSpellings,
    Borders,
    BorderedBy,
    Capitals,
    Car,
    Continents,
    Currencies,
    Demonyms,
    Flags,
    Gini,
    Idd,
    Languages,
    Latlng,
    Maps,
    NativeNames,
    Timezones,
    Tld,
    Translations,
}

/// Every field a client may select, in presentation order
pub const VALID_FIELDS: &[Field] = &[
    Field::Id,
    Field::NameCommon,
    Field::NameOfficial,
    Field::Cca2,
    Field::Ccn3,
    Field::Cca3,
    Field::Cioc,
    Field::Fifa,
    Field::Independent,
    Field::Status,
    Field::UnMember,
    Field::Region,
    Field::Subregion,
    Field::Landlocked,
    Field::Area,
    Field::Flag,
    Field::Population,
    Field::AltSpellings,
    Field::Borders,
    Field::BorderedBy,
    Field::Capitals,
    Field::Car,
    Field::Continents,
    Field::Currencies,
    Field::Demonyms,
    Field::Flags,
    Field::Gini,
    Field::Idd,
    Field::Languages,
    Field::Latlng,
    Field::Maps,
    Field::NativeNames,
    Field::Timezones,
    Field::Tld,
    Field::Translations,
];

/// Relations attached when the request carries no `fields` parameter
pub const DEFAULT_INCLUDES: &[Field] = &[
    Field::Borders,
    Field::Currencies,
    Field::Languages,
    Field::Maps,
    Field::Timezones,
    Field::Translations,
    Field::AltSpellings,
    Field::Capitals,
    Field::Car,
    Field::Continents,
    Field::Demonyms,
    Field::Flags,
    Field::Gini,
    Field::Idd,
    Field::Latlng,
    Field::Tld,
    Field::NativeNames,
];

impl Field {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::NameCommon => "name_common",
            Field::NameOfficial => "name_official",
            Field::Cca2 => "cca2",
            Field::Ccn3 => "ccn3",
            Field::Cca3 => "cca3",
            Field::Cioc => "cioc",
            Field::Fifa => "fifa",
            Field::Independent => "independent",
            Field::Status => "status",
            Field::UnMember => "un_member",
            Field::Region => "region",
            Field::Subregion => "subregion",
            Field::Landlocked => "landlocked",
            Field::Area => "area",
            Field::Flag => "flag",
            Field::Population => "population",
            Field::AltSpellings => "alt_spellings",
            Field::Borders => "borders",
            Field::BorderedBy => "bordered_by",
            Field::Capitals => "capitals",
            Field::Car => "car",
            Field::Continents => "continents",
            Field::Currencies => "currencies",
            Field::Demonyms => "demonyms",
            Field::Flags => "flags",
            Field::Gini => "gini",
            Field::Idd => "idd",
            Field::Languages => "languages",
            Field::Latlng => "latlng",
            Field::Maps => "maps",
            Field::NativeNames => "native_names",
            Field::Timezones => "timezones",
            Field::Tld => "tld",
            Field::Translations => "translations",
        }
    }

    /// Relations live in their own tables; everything else is a column
    /// of the country row.
    pub fn is_relation(&self) -> bool {
        *self >= Field::AltSpellings
    }

    pub fn is_default_include(&self) -> bool {
        DEFAULT_INCLUDES.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name outside the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALID_FIELDS
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
