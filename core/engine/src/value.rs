//! FILENAME: core/engine/src/value.rs
//! PURPOSE: Defines the typed value held by every cell of a parsed dataset.
//! CONTEXT: `Value` is the closed set of variants all downstream code works
//! with. It is hashable so it can be interned and used as a grouping key.
//! Number equality treats all NaNs as equal and 0.0 == -0.0.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single typed cell value.
///
/// Serializes untagged, so JSON consumers see `null`, `true`, `3.5` or `"text"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Numeric view used by the aggregation operators.
    /// Booleans count as 1/0; Null, Text and NaN contribute 0.
    pub fn numeric_or_zero(&self) -> f64 {
        match self {
            Value::Number(n) if !n.is_nan() => *n,
            Value::Boolean(true) => 1.0,
            _ => 0.0,
        }
    }

    /// Canonical text form: the form drill filters compare on and exports write.
    /// Integral numbers print without a fractional part, so Number(2023) and
    /// Text("2023") share the canonical form "2023".
    pub fn canonical_text(&self) -> String {
        self.to_string()
    }

    /// Compares two values of the same variant. Cross-variant comparison is
    /// undefined and yields `None`.
    pub fn cmp_same_variant(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => Some(a.total_cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => fmt_number(*n, f),
            Value::Text(s) => f.write_str(s),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n == 0.0 {
        // -0 prints as 0
        f.write_str("0")
    } else if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{}", n)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Number(n) => {
                if n.is_nan() {
                    u64::MAX.hash(state);
                } else if *n == 0.0 {
                    0u64.hash(state);
                } else {
                    n.to_bits().hash(state);
                }
            }
            Value::Text(s) => s.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.cmp_same_variant(other)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_text_matches_across_variants() {
        assert_eq!(Value::Number(2023.0).canonical_text(), "2023");
        assert_eq!(Value::text("2023").canonical_text(), "2023");
        assert_eq!(Value::Number(3.5).canonical_text(), "3.5");
        assert_eq!(Value::Number(-0.0).canonical_text(), "0");
        assert_eq!(Value::Boolean(true).canonical_text(), "true");
        assert_eq!(Value::Null.canonical_text(), "");
    }

    #[test]
    fn equality_is_per_variant() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::Number(0.0), Value::Number(-0.0));
        assert_ne!(Value::Number(1.0), Value::text("1"));
        assert_ne!(Value::Null, Value::Boolean(false));
    }

    #[test]
    fn ordering_undefined_across_variants() {
        assert_eq!(Value::Number(1.0).partial_cmp(&Value::Number(2.0)), Some(Ordering::Less));
        assert_eq!(Value::text("b").partial_cmp(&Value::text("a")), Some(Ordering::Greater));
        assert_eq!(Value::Number(1.0).partial_cmp(&Value::text("1")), None);
    }

    #[test]
    fn numeric_view_for_aggregation() {
        assert_eq!(Value::Number(4.5).numeric_or_zero(), 4.5);
        assert_eq!(Value::Boolean(true).numeric_or_zero(), 1.0);
        assert_eq!(Value::text("abc").numeric_or_zero(), 0.0);
        assert_eq!(Value::Null.numeric_or_zero(), 0.0);
    }

    #[test]
    fn serializes_untagged() {
        let values = vec![Value::Null, Value::Boolean(false), Value::Number(2.0), Value::text("x")];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,false,2.0,"x"]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
