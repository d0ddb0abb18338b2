//! FILENAME: core/drill-engine/src/definition.rs
//! Chart Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a drillable chart.
//! These structures are designed to be:
//! - Deserialized from the JSON chart configuration (camelCase keys)
//! - Validated once, before a session is opened
//! - Immutable snapshots of user intent
//!
//! Reuses AggregationType and BarMode from pivot-engine.

use engine::{infer_drill_path, FieldProfiles, DEFAULT_MAX_CATEGORIES};
use pivot_engine::{AggregationType, BarMode, SortMode, ViewOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name used for exports when the configuration names none.
pub const DEFAULT_FILE_NAME: &str = "chart_data";

// ============================================================================
// ERRORS
// ============================================================================

/// A caller contract violation in the chart configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("mappings.x is required")]
    MissingXField,

    #[error("mappings.y is required for the {op} operator")]
    MissingYField { op: AggregationType },

    #[error("heatmap charts require mappings.color as the row dimension")]
    MissingHeatmapRowField,
}

// ============================================================================
// CHART TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Heatmap,
}

// ============================================================================
// MAPPINGS
// ============================================================================

/// Which fields feed the chart and how values are reduced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mappings {
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub y: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub y_op: AggregationType,
}

/// Drill configuration. An explicit non-empty path overrides inference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrilldownConfig {
    #[serde(default)]
    pub path: Option<Vec<String>>,
    /// Series key used at drilled levels (level > 0) instead of `mappings.color`.
    #[serde(default)]
    pub color: Option<String>,
}

/// Presentation options carried through to the view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_title: Option<String>,
    #[serde(default)]
    pub y_title: Option<String>,
    #[serde(default, rename = "barmode")]
    pub bar_mode: Option<BarMode>,
}

// ============================================================================
// CHART SPEC
// ============================================================================

fn default_max_categories() -> usize {
    DEFAULT_MAX_CATEGORIES
}

/// Declarative description of what to plot and how to aggregate and drill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub mappings: Mappings,
    #[serde(default)]
    pub drilldown: DrilldownConfig,
    #[serde(default = "default_max_categories")]
    pub drill_max_cats: usize,
    #[serde(default)]
    pub format: FormatOptions,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        ChartSpec {
            chart_type: ChartType::default(),
            mappings: Mappings::default(),
            drilldown: DrilldownConfig::default(),
            drill_max_cats: DEFAULT_MAX_CATEGORIES,
            format: FormatOptions::default(),
            file_name: None,
        }
    }
}

impl ChartSpec {
    /// A bar chart of `y` by `x` under `op`.
    pub fn new(x: impl Into<String>, y: Option<&str>, op: AggregationType) -> Self {
        ChartSpec {
            mappings: Mappings {
                x: Some(x.into()),
                y: y.map(str::to_string),
                color: None,
                y_op: op,
            },
            ..ChartSpec::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.mappings.color = Some(color.into());
        self
    }

    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    pub fn with_drill_path(mut self, path: Vec<String>) -> Self {
        self.drilldown.path = Some(path);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.format.title = Some(title.into());
        self
    }

    /// Checks the mappings a session cannot run without.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.x_field()?;
        let op = self.mappings.y_op;
        if op.needs_value_field() && non_blank(self.mappings.y.as_deref()).is_none() {
            return Err(ConfigurationError::MissingYField { op });
        }
        if self.chart_type == ChartType::Heatmap && self.row_field().is_none() {
            return Err(ConfigurationError::MissingHeatmapRowField);
        }
        Ok(())
    }

    /// The primary x field.
    pub fn x_field(&self) -> Result<&str, ConfigurationError> {
        non_blank(self.mappings.x.as_deref()).ok_or(ConfigurationError::MissingXField)
    }

    /// The value column, if any. Ignored by `count`.
    pub fn value_field(&self) -> Option<&str> {
        non_blank(self.mappings.y.as_deref())
    }

    /// The top-level color (series) field.
    pub fn row_field(&self) -> Option<&str> {
        non_blank(self.mappings.color.as_deref())
    }

    /// The series key at `level`. Drilled levels prefer `drilldown.color`.
    pub fn color_for_level(&self, level: usize) -> Option<&str> {
        if level > 0 {
            if let Some(color) = non_blank(self.drilldown.color.as_deref()) {
                return Some(color);
            }
        }
        self.row_field()
    }

    /// The explicit drill path, when one is configured and non-empty.
    pub fn explicit_drill_path(&self) -> Option<&[String]> {
        self.drilldown.path.as_deref().filter(|p| !p.is_empty())
    }

    /// The drill path for a session: the explicit path, or one inferred
    /// from `profiles`. The flag reports whether it was inferred.
    pub fn resolve_drill_path(
        &self,
        profiles: &FieldProfiles,
    ) -> Result<(Vec<String>, bool), ConfigurationError> {
        if let Some(path) = self.explicit_drill_path() {
            return Ok((path.to_vec(), false));
        }
        let x = self.x_field()?;
        Ok((infer_drill_path(profiles, x, self.row_field()), true))
    }

    /// Initial per-session view options; bar mode comes from `format.barmode`.
    pub fn initial_view_options(&self) -> ViewOptions {
        ViewOptions::new(SortMode::default(), self.format.bar_mode.unwrap_or_default())
    }

    /// Download name for exports, with the `.csv` extension.
    pub fn export_file_name(&self) -> String {
        let base = non_blank(self.file_name.as_deref()).unwrap_or(DEFAULT_FILE_NAME);
        format!("{}.csv", base)
    }

    pub fn title(&self) -> &str {
        self.format.title.as_deref().unwrap_or("")
    }

    /// Axis titles `(x, y)`, empty when not configured.
    pub fn axis_titles(&self) -> (&str, &str) {
        (
            self.format.x_title.as_deref().unwrap_or(""),
            self.format.y_title.as_deref().unwrap_or(""),
        )
    }
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.filter(|f| !f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_wire_shape_with_defaults() {
        let spec: ChartSpec = serde_json::from_str(
            r#"{"mappings":{"x":"cat","y":"amt"},"somethingElse":1}"#,
        )
        .unwrap();
        assert_eq!(spec.chart_type, ChartType::Bar);
        assert_eq!(spec.mappings.y_op, AggregationType::Sum);
        assert_eq!(spec.drill_max_cats, 30);
        assert_eq!(spec.export_file_name(), "chart_data.csv");
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn deserializes_full_shape() {
        let spec: ChartSpec = serde_json::from_str(
            r#"{
                "chartType": "heatmap",
                "mappings": {"x": "cat", "y": "amt", "color": "region", "yOp": "max"},
                "drilldown": {"path": ["cat", "yr"], "color": "supplier"},
                "drillMaxCats": 12,
                "format": {"title": "Spend", "xTitle": "Category", "barmode": "stack"},
                "fileName": "spend"
            }"#,
        )
        .unwrap();
        assert_eq!(spec.chart_type, ChartType::Heatmap);
        assert_eq!(spec.mappings.y_op, AggregationType::Max);
        assert_eq!(spec.explicit_drill_path().unwrap(), &["cat".to_string(), "yr".to_string()]);
        assert_eq!(spec.drill_max_cats, 12);
        assert_eq!(spec.initial_view_options().bar_mode, BarMode::Stack);
        assert_eq!(spec.export_file_name(), "spend.csv");
        assert_eq!(spec.color_for_level(0), Some("region"));
        assert_eq!(spec.color_for_level(1), Some("supplier"));
    }

    #[test]
    fn missing_x_is_a_configuration_error() {
        let spec = ChartSpec::default();
        assert_eq!(spec.validate(), Err(ConfigurationError::MissingXField));
        let blank = ChartSpec::new("  ", Some("amt"), AggregationType::Sum);
        assert_eq!(blank.validate(), Err(ConfigurationError::MissingXField));
    }

    #[test]
    fn y_required_unless_count() {
        let spec = ChartSpec::new("cat", None, AggregationType::Mean);
        assert_eq!(
            spec.validate(),
            Err(ConfigurationError::MissingYField { op: AggregationType::Mean })
        );
        assert!(ChartSpec::new("cat", None, AggregationType::Count).validate().is_ok());
    }

    #[test]
    fn heatmap_needs_row_field() {
        let spec = ChartSpec::new("cat", Some("amt"), AggregationType::Sum)
            .with_chart_type(ChartType::Heatmap);
        assert_eq!(spec.validate(), Err(ConfigurationError::MissingHeatmapRowField));
        assert!(spec.with_color("region").validate().is_ok());
    }

    #[test]
    fn empty_explicit_path_falls_back_to_inference() {
        let spec = ChartSpec::new("cat", Some("amt"), AggregationType::Sum).with_drill_path(vec![]);
        assert!(spec.explicit_drill_path().is_none());
        let (path, inferred) = spec.resolve_drill_path(&FieldProfiles::default()).unwrap();
        assert_eq!(path, vec!["cat"]);
        assert!(inferred);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigurationError::MissingYField { op: AggregationType::Sum }.to_string(),
            "mappings.y is required for the sum operator"
        );
    }
}
