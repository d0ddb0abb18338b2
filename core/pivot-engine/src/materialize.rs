//! FILENAME: core/pivot-engine/src/materialize.rs
//! View Materializer - Sort policy and export flattening over a ShapedResult.
//!
//! Both operations are pure: they take a result by reference and return a
//! new value. Sorting computes one permutation and applies it to `x` and
//! every series, so positional alignment survives. Matrix results are
//! returned in their insertion order.

use crate::definition::SortMode;
use crate::view::{ExportTable, MultiSeries, ShapedResult, SingleSeries};
use engine::{FieldFilter, Value};
use std::cmp::Ordering;

/// Column holding the series name in a multi-series export.
pub const SERIES_COLUMN: &str = "series";
/// Column holding the aggregated number in every export.
pub const VALUE_COLUMN: &str = "value";

// ============================================================================
// SORT
// ============================================================================

/// Returns `shaped` reordered under `mode`. Set membership and lengths never change.
pub fn sort_result(shaped: &ShapedResult, mode: SortMode) -> ShapedResult {
    match shaped {
        ShapedResult::Single(s) => {
            let order = permutation(&s.x, &s.y, mode);
            ShapedResult::Single(SingleSeries {
                x: apply(&s.x, &order),
                y: apply_values(&s.y, &order),
            })
        }
        ShapedResult::Multi(m) => {
            let order = permutation(&m.x, &m.totals(), mode);
            let mut sorted = MultiSeries {
                x: apply(&m.x, &order),
                series: m.series.clone(),
            };
            for series in &mut sorted.series {
                series.y = apply_values(&series.y, &order);
            }
            ShapedResult::Multi(sorted)
        }
        ShapedResult::Matrix(p) => ShapedResult::Matrix(p.clone()),
    }
}

/// Stable ordering of x positions. Label mode compares canonical text
/// case-insensitively first, value mode sorts totals descending.
fn permutation(x: &[Value], totals: &[f64], mode: SortMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..x.len()).collect();
    match mode {
        SortMode::Label => {
            let labels: Vec<String> = x.iter().map(Value::canonical_text).collect();
            order.sort_by(|&a, &b| label_cmp(&labels[a], &labels[b]));
        }
        SortMode::Value => {
            let total = |i: usize| totals.get(i).copied().unwrap_or(0.0);
            order.sort_by(|&a, &b| total(b).total_cmp(&total(a)));
        }
    }
    order
}

fn label_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn apply<T: Clone>(items: &[T], order: &[usize]) -> Vec<T> {
    order.iter().filter_map(|&i| items.get(i).cloned()).collect()
}

/// Reorders a y array against `order`, padding missing positions with 0.
fn apply_values(values: &[f64], order: &[usize]) -> Vec<f64> {
    order
        .iter()
        .map(|&i| values.get(i).copied().unwrap_or(0.0))
        .collect()
}

// ============================================================================
// EXPORT
// ============================================================================

/// Flattens a result into rows for download.
///
/// Columns: one per active drill filter (holding its selected value), then
/// `x_field`, then `series` for multi-series results (the row field name for
/// a matrix), then `value`. Multi-series rows are emitted series-major.
pub fn flatten_for_export(
    shaped: &ShapedResult,
    x_field: &str,
    filters: &[FieldFilter],
) -> ExportTable {
    let mut columns: Vec<String> = filters.iter().map(|f| f.field.clone()).collect();
    let prefix: Vec<Value> = filters.iter().map(|f| f.value.clone()).collect();
    columns.push(x_field.to_string());

    let with_prefix = |tail: Vec<Value>| -> Vec<Value> {
        let mut row = prefix.clone();
        row.extend(tail);
        row
    };

    let rows = match shaped {
        ShapedResult::Single(s) => {
            columns.push(VALUE_COLUMN.to_string());
            s.x.iter()
                .zip(&s.y)
                .map(|(x, y)| with_prefix(vec![x.clone(), Value::Number(*y)]))
                .collect()
        }
        ShapedResult::Multi(m) => {
            columns.push(SERIES_COLUMN.to_string());
            columns.push(VALUE_COLUMN.to_string());
            m.series
                .iter()
                .flat_map(|series| {
                    m.x.iter().zip(&series.y).map(|(x, y)| {
                        with_prefix(vec![x.clone(), series.name.clone(), Value::Number(*y)])
                    })
                })
                .collect()
        }
        ShapedResult::Matrix(p) => {
            columns.push(SERIES_COLUMN.to_string());
            columns.push(VALUE_COLUMN.to_string());
            p.ys
                .iter()
                .zip(&p.z)
                .flat_map(|(y, row)| {
                    p.xs.iter().zip(row).map(|(x, z)| {
                        with_prefix(vec![x.clone(), y.clone(), Value::Number(*z)])
                    })
                })
                .collect()
        }
    };

    ExportTable { columns, rows }
}
