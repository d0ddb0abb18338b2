//! FILENAME: core/engine/src/coerce.rs
//! PURPOSE: Classifies and converts raw cell text into a typed `Value`.
//! CONTEXT: Called by the dataset builder for every data cell. Coercion is
//! total: every input maps to exactly one variant, there is no failure mode.
//!
//! RULES (applied to the trimmed text, first match wins):
//! 1. empty, "null" (any case), "NA"        -> Null
//! 2. "true" / "false" (any case)            -> Boolean
//! 3. signed integer/decimal, opt. exponent  -> Number
//! 4. anything else                          -> Text

use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid number pattern")
});

/// Coerces one raw cell into a `Value`.
pub fn coerce(raw: &str) -> Value {
    let v = raw.trim();

    if v.is_empty() || v.eq_ignore_ascii_case("null") || v == "NA" {
        return Value::Null;
    }
    if v.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if v.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if NUMBER_PATTERN.is_match(v) {
        if let Ok(n) = v.parse::<f64>() {
            return Value::Number(n);
        }
    }
    Value::Text(v.to_string())
}
