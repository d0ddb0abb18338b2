//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: Equality filter on one field, the unit of a drill filter chain.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Keeps rows whose `field` has the same canonical text as `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: Value) -> Self {
        FieldFilter {
            field: field.into(),
            value,
        }
    }

    /// Same comparison `Dataset::filter` applies.
    pub fn accepts(&self, candidate: &Value) -> bool {
        candidate.canonical_text() == self.value.canonical_text()
    }
}

impl std::fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.value)
    }
}
