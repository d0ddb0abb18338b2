//! FILENAME: core/pivot-engine/src/engine.rs
//! Aggregation Engine - Turns a set of rows into a chart-ready result.
//!
//! Algorithm:
//! 1. Build a GroupCache in one pass (x, optional secondary key)
//! 2. Walk the x axis in first-seen order
//! 3. For multi-series and matrix results, cross every x with every
//!    secondary value; combinations with no rows read as empty groups (0)
//!
//! The secondary key is the color field for `aggregate` and the row field
//! for `pivot`. Both share the same cache, so the operator semantics are
//! identical between the two.

use crate::cache::{GroupCache, GroupKey, ValueId};
use crate::definition::AggregationType;
use crate::view::{MultiSeries, PivotMatrix, Series, ShapedResult, SingleSeries};
use engine::RowSet;

// ============================================================================
// AGGREGATE
// ============================================================================

/// Groups `rows` by `x_field` (and `color_field` when given) and reduces
/// `y_field` with `aggregation`.
///
/// Without a color field the result is a single series. With one, every
/// series is aligned against the union of x values across all colors.
/// Without a y field every row contributes 1.
pub fn aggregate(
    rows: &RowSet<'_>,
    x_field: &str,
    y_field: Option<&str>,
    color_field: Option<&str>,
    aggregation: AggregationType,
) -> ShapedResult {
    let cache = GroupCache::build(rows, x_field, color_field, y_field);
    log::debug!(
        "aggregate {} by {}{}: {} rows -> {} groups",
        aggregation,
        x_field,
        color_field.map(|c| format!(" x {}", c)).unwrap_or_default(),
        cache.rows_seen(),
        cache.group_count()
    );

    match &cache.secondary_axis {
        None => ShapedResult::Single(single_series(&cache, aggregation)),
        Some(colors) => {
            let series = (0..colors.unique_count() as ValueId)
                .zip(colors.values())
                .map(|(color_id, name)| Series {
                    name: name.clone(),
                    y: row_for(&cache, color_id, aggregation),
                })
                .collect();
            ShapedResult::Multi(MultiSeries {
                x: cache.x_axis.values().to_vec(),
                series,
            })
        }
    }
}

fn single_series(cache: &GroupCache, aggregation: AggregationType) -> SingleSeries {
    let y = (0..cache.x_axis.unique_count() as ValueId)
        .map(|x_id| cache.compute(&GroupKey::single(x_id), aggregation))
        .collect();
    SingleSeries {
        x: cache.x_axis.values().to_vec(),
        y,
    }
}

/// One value per x for a fixed secondary value.
fn row_for(cache: &GroupCache, secondary_id: ValueId, aggregation: AggregationType) -> Vec<f64> {
    (0..cache.x_axis.unique_count() as ValueId)
        .map(|x_id| cache.compute(&GroupKey::pair(x_id, secondary_id), aggregation))
        .collect()
}

// ============================================================================
// PIVOT
// ============================================================================

/// Builds the dense matrix `z[yi][xi]` over the unique values of `x_field`
/// (columns) and `y_field` (rows), reducing `value_field`.
pub fn pivot(
    rows: &RowSet<'_>,
    x_field: &str,
    y_field: &str,
    value_field: Option<&str>,
    aggregation: AggregationType,
) -> PivotMatrix {
    let mut cache = GroupCache::build(rows, x_field, Some(y_field), value_field);
    let ys = cache.secondary_axis.take().map(|axis| axis.into_values()).unwrap_or_default();

    let z: Vec<Vec<f64>> = (0..ys.len() as ValueId)
        .map(|y_id| row_for(&cache, y_id, aggregation))
        .collect();

    log::debug!(
        "pivot {} by {} x {}: {} rows -> {}x{} matrix",
        aggregation,
        x_field,
        y_field,
        cache.rows_seen(),
        ys.len(),
        cache.x_axis.unique_count()
    );

    PivotMatrix {
        xs: cache.x_axis.into_values(),
        ys,
        z,
    }
}
