//! FILENAME: core/pivot-engine/src/definition.rs
//! Aggregation & View Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE an aggregation and how
//! its result is presented. These structures are designed to be:
//! - Serializable (they arrive inside chart configurations as JSON)
//! - Small, copyable values passed explicitly per chart session

use serde::{Deserialize, Serialize};

// ============================================================================
// AGGREGATION
// ============================================================================

/// Reduction applied to the values of each group (`yOp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    #[default]
    Sum,
    #[serde(alias = "average", alias = "avg")]
    Mean,
    Count,
    Min,
    Max,
}

impl AggregationType {
    /// Whether the operator reads the value column at all.
    pub fn needs_value_field(&self) -> bool {
        !matches!(self, AggregationType::Count)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Mean => "mean",
            AggregationType::Count => "count",
            AggregationType::Min => "min",
            AggregationType::Max => "max",
        }
    }
}

impl std::fmt::Display for AggregationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// VIEW OPTIONS
// ============================================================================

/// How the x categories of a result are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Lexicographic on the canonical text of x.
    #[default]
    Label,
    /// Descending by value (per-x total for multi-series results).
    Value,
}

impl SortMode {
    pub fn toggled(self) -> Self {
        match self {
            SortMode::Label => SortMode::Value,
            SortMode::Value => SortMode::Label,
        }
    }
}

/// How a multi-series bar chart lays out its bars. Passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    #[default]
    Group,
    Stack,
}

impl BarMode {
    pub fn toggled(self) -> Self {
        match self {
            BarMode::Group => BarMode::Stack,
            BarMode::Stack => BarMode::Group,
        }
    }
}

/// Per-session presentation state. Owned by the session, never global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    #[serde(default)]
    pub sort_mode: SortMode,
    #[serde(default)]
    pub bar_mode: BarMode,
}

impl ViewOptions {
    pub fn new(sort_mode: SortMode, bar_mode: BarMode) -> Self {
        ViewOptions { sort_mode, bar_mode }
    }

    pub fn toggle_sort(&mut self) {
        self.sort_mode = self.sort_mode.toggled();
    }

    pub fn toggle_bar_mode(&mut self) {
        self.bar_mode = self.bar_mode.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_names_round_trip() {
        for op in [
            AggregationType::Sum,
            AggregationType::Mean,
            AggregationType::Count,
            AggregationType::Min,
            AggregationType::Max,
        ] {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.name()));
            let back: AggregationType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, op);
        }
        let avg: AggregationType = serde_json::from_str("\"average\"").unwrap();
        assert_eq!(avg, AggregationType::Mean);
    }

    #[test]
    fn toggles() {
        let mut options = ViewOptions::default();
        assert_eq!(options.sort_mode, SortMode::Label);
        options.toggle_sort();
        options.toggle_bar_mode();
        assert_eq!(options, ViewOptions::new(SortMode::Value, BarMode::Stack));
    }
}
