//! # Field Projection
//!
//! Shapes a country row into its JSON representation: either exactly the
//! selected fields, or every column plus a set of included relations.

use serde_json::{Map, Value};

use super::fields::{Field, DEFAULT_INCLUDES};
use crate::store::model::Country;

/// Which parts of a country a query returns. Selection and inclusion are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Only these fields, nothing else
    Select(Vec<Field>),

    /// All columns plus these relations
    Include(Vec<Field>),
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Include(DEFAULT_INCLUDES.to_vec())
    }
}

impl Projection {
    /// True when the client narrowed the representation
    pub fn is_restricted(&self) -> bool {
        matches!(self, Projection::Select(_))
    }

    /// Check if the projection keeps this field
    pub fn keeps(&self, field: Field) -> bool {
        match self {
            Projection::Select(fields) => fields.contains(&field),
            Projection::Include(relations) => !field.is_relation() || relations.contains(&field),
        }
    }

    /// Render a country under this projection
    pub fn apply(&self, country: &Country) -> Result<Value, serde_json::Error> {
        let Value::Object(row) = serde_json::to_value(country)? else {
            return Ok(Value::Null);
        };

        let projected: Map<String, Value> = row
            .into_iter()
            .filter(|(key, _)| key.parse::<Field>().is_ok_and(|field| self.keeps(field)))
            .collect();

        Ok(Value::Object(projected))
    }
}
