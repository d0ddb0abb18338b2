//! FILENAME: core/pivot-engine/src/view.rs
//! Shaped View - Chart-ready output for the rendering collaborator.
//!
//! Every aggregation call produces a fresh `ShapedResult`:
//! - Single series: `{x, y}`
//! - Multi series:  `{x, series: [{name, y}]}`, every `y` as long as `x`
//! - Matrix:        `{xs, ys, z}`, `z` is `len(ys)` rows of `len(xs)` cells
//!
//! The JSON shape is untagged so consumers see exactly those objects.

use engine::Value;
use serde::{Deserialize, Serialize};

// ============================================================================
// RESULT SHAPES
// ============================================================================

/// One x array with one y array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleSeries {
    pub x: Vec<Value>,
    pub y: Vec<f64>,
}

/// A named series positionally aligned against a shared x array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: Value,
    pub y: Vec<f64>,
}

impl Series {
    pub fn total(&self) -> f64 {
        self.y.iter().sum()
    }
}

/// Several series sharing the union of x values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSeries {
    pub x: Vec<Value>,
    pub series: Vec<Series>,
}

impl MultiSeries {
    /// Sum across all series at each x position. Missing cells count as 0.
    pub fn totals(&self) -> Vec<f64> {
        (0..self.x.len())
            .map(|i| {
                self.series
                    .iter()
                    .map(|s| s.y.get(i).copied().unwrap_or(0.0))
                    .sum()
            })
            .collect()
    }

    /// Whether every series has exactly one y per x.
    pub fn is_aligned(&self) -> bool {
        self.series.iter().all(|s| s.y.len() == self.x.len())
    }
}

/// Dense matrix for heatmap-style views: `z[yi][xi]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotMatrix {
    pub xs: Vec<Value>,
    pub ys: Vec<Value>,
    pub z: Vec<Vec<f64>>,
}

impl PivotMatrix {
    pub fn cell(&self, x_index: usize, y_index: usize) -> Option<f64> {
        self.z.get(y_index).and_then(|row| row.get(x_index)).copied()
    }
}

/// The aggregated, chart-ready output of one aggregation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapedResult {
    Single(SingleSeries),
    Multi(MultiSeries),
    Matrix(PivotMatrix),
}

impl ShapedResult {
    /// Number of x positions (columns for a matrix).
    pub fn len(&self) -> usize {
        match self {
            ShapedResult::Single(s) => s.x.len(),
            ShapedResult::Multi(m) => m.x.len(),
            ShapedResult::Matrix(p) => p.xs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn x(&self) -> &[Value] {
        match self {
            ShapedResult::Single(s) => &s.x,
            ShapedResult::Multi(m) => &m.x,
            ShapedResult::Matrix(p) => &p.xs,
        }
    }

    /// Sum of every produced number.
    pub fn total(&self) -> f64 {
        match self {
            ShapedResult::Single(s) => s.y.iter().sum(),
            ShapedResult::Multi(m) => m.series.iter().map(Series::total).sum(),
            ShapedResult::Matrix(p) => p.z.iter().flatten().sum(),
        }
    }

    /// Collapses the result to pie slices: one slice per x for a single
    /// series, one slice per series (its total) for multi-series, one per
    /// matrix row (its total) for a matrix.
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        match self {
            ShapedResult::Single(s) => s
                .x
                .iter()
                .zip(&s.y)
                .map(|(label, value)| PieSlice {
                    label: label.clone(),
                    value: *value,
                })
                .collect(),
            ShapedResult::Multi(m) => m
                .series
                .iter()
                .map(|s| PieSlice {
                    label: s.name.clone(),
                    value: s.total(),
                })
                .collect(),
            ShapedResult::Matrix(p) => p
                .ys
                .iter()
                .zip(&p.z)
                .map(|(label, row)| PieSlice {
                    label: label.clone(),
                    value: row.iter().sum(),
                })
                .collect(),
        }
    }
}

/// One slice of a pie view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: Value,
    pub value: f64,
}

// ============================================================================
// EXPORT TABLE
// ============================================================================

/// Flattened rows of a visible result, ready for delimited-text serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The value of `column` in row `row`, if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let position = self.columns.iter().rposition(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(position))
    }
}
