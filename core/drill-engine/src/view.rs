//! FILENAME: core/drill-engine/src/view.rs
//! Level View - What the renderer receives for one drill level.
//!
//! Wraps the shaped result with the navigation context the chart shell
//! needs: the breadcrumb title, whether a click can drill further, and the
//! presentation options in force. Export flattening starts from here.

use crate::definition::ChartType;
use engine::FieldFilter;
use pivot_engine::{flatten_for_export, BarMode, ExportTable, PieSlice, ShapedResult, SortMode};
use serde::{Deserialize, Serialize};

/// Separator between the chart title and the breadcrumb.
pub const TITLE_SEPARATOR: &str = " \u{2014} ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelView {
    pub level: usize,
    /// Length of the drill path in force.
    pub depth: usize,
    pub chart_type: ChartType,
    pub x_field: String,
    pub color_field: Option<String>,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub can_drill: bool,
    pub sort_mode: SortMode,
    pub bar_mode: BarMode,
    /// Rows that survived the drill filters.
    pub row_count: usize,
    pub filters: Vec<FieldFilter>,
    pub shaped: ShapedResult,
}

impl LevelView {
    /// Slices for a pie rendering of this level.
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        self.shaped.pie_slices()
    }

    /// Flattens the visible result, drill filters first.
    pub fn export(&self) -> ExportTable {
        flatten_for_export(&self.shaped, &self.x_field, &self.filters)
    }

    pub fn is_empty(&self) -> bool {
        self.shaped.is_empty()
    }
}

/// `title — crumb`, or whichever of the two is non-empty.
pub fn compose_title(title: &str, breadcrumb: &str) -> String {
    match (title.is_empty(), breadcrumb.is_empty()) {
        (_, true) => title.to_string(),
        (true, false) => breadcrumb.to_string(),
        (false, false) => format!("{}{}{}", title, TITLE_SEPARATOR, breadcrumb),
    }
}
