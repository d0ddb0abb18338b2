//! FILENAME: core/drill-engine/src/engine.rs
//! Drill Engine - Calculates the view for one drill level.
//!
//! Algorithm:
//! 1. Refilter the FULL dataset with the first `level` filters
//! 2. Pick the level's x field (`path[level]`, else `mappings.x`)
//! 3. Pick the series key (dropped when it equals the level's x field)
//! 4. Aggregate (or pivot the level field against the series key, for
//!    heatmaps) and apply the sort mode
//!
//! Refiltering from the full dataset on every call means the result never
//! depends on which levels were calculated before.

use crate::definition::{ChartSpec, ChartType, ConfigurationError};
use crate::state::DrillState;
use crate::view::{compose_title, LevelView};
use engine::{Dataset, RowSet};
use pivot_engine::{aggregate, pivot, sort_result, ShapedResult, ViewOptions};

/// Rows of `dataset` matching the first `level` filters of `state`.
pub fn filtered_rows<'a>(dataset: &'a Dataset, state: &DrillState, level: usize) -> RowSet<'a> {
    let rows = dataset.filter(state.filters_for(level));
    log::debug!(
        "drill level {}: {} of {} rows",
        level,
        rows.len(),
        dataset.len()
    );
    rows
}

/// The x field shown at `level`.
pub fn x_field_for_level<'s>(
    spec: &'s ChartSpec,
    path: &'s [String],
    level: usize,
) -> Result<&'s str, ConfigurationError> {
    match path.get(level) {
        Some(field) => Ok(field.as_str()),
        None => spec.x_field(),
    }
}

/// Calculates the chart for the state's current level.
pub fn calculate_level(
    dataset: &Dataset,
    spec: &ChartSpec,
    path: &[String],
    state: &DrillState,
    options: &ViewOptions,
) -> Result<LevelView, ConfigurationError> {
    let level = state.level();
    let x_field = x_field_for_level(spec, path, level)?;
    let color_field = spec.color_for_level(level).filter(|c| *c != x_field);
    let rows = filtered_rows(dataset, state, level);
    let op = spec.mappings.y_op;
    let value_field = spec.value_field();

    let shaped = match (spec.chart_type, color_field) {
        (ChartType::Heatmap, Some(row_field)) => {
            ShapedResult::Matrix(pivot(&rows, x_field, row_field, value_field, op))
        }
        _ => aggregate(&rows, x_field, value_field, color_field, op),
    };
    let shaped = sort_result(&shaped, options.sort_mode);
    let (x_title, y_title) = spec.axis_titles();

    Ok(LevelView {
        level,
        depth: path.len(),
        chart_type: spec.chart_type,
        x_field: x_field.to_string(),
        color_field: color_field.map(str::to_string),
        title: compose_title(spec.title(), &state.breadcrumb()),
        x_title: x_title.to_string(),
        y_title: y_title.to_string(),
        can_drill: state.can_step_in(path),
        sort_mode: options.sort_mode,
        bar_mode: options.bar_mode,
        row_count: rows.len(),
        filters: state.filters().to_vec(),
        shaped,
    })
}
