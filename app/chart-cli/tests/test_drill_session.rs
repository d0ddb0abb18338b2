//! FILENAME: tests/test_drill_session.rs
//! Integration tests for opening, drilling and sorting a chart.

mod common;

use common::{SalesFixture, TestHarness};
use engine::Value;
use pivot_engine::{ShapedResult, SortMode};
use pretty_assertions::assert_eq;

fn labels(values: &[Value]) -> Vec<String> {
    values.iter().map(Value::canonical_text).collect()
}

fn single_y(shaped: &ShapedResult) -> Vec<f64> {
    match shaped {
        ShapedResult::Single(s) => s.y.clone(),
        other => panic!("expected single series, got {:?}", other),
    }
}

// ============================================================================
// MAIN LEVEL
// ============================================================================

#[test]
fn test_main_aggregation() {
    let mut harness = TestHarness::with_category_years();
    harness.set_spec(r#"{"mappings":{"x":"cat","y":"amt","yOp":"sum"}}"#);

    let report = harness.run(&[]);
    assert_eq!(report.view.level, 0);
    assert_eq!(labels(report.view.shaped.x()), vec!["A", "B"]);
    assert_eq!(single_y(&report.view.shaped), vec![15.0, 7.0]);
    assert!(report.view.can_drill);
    assert!(report.path_inferred);
}

#[test]
fn test_sort_by_value_keeps_descending_main() {
    let mut harness = TestHarness::with_category_years();
    harness.set_spec(r#"{"mappings":{"x":"cat","y":"amt"}}"#);

    let report = harness.run(&["--sort", "value"]);
    assert_eq!(report.view.sort_mode, SortMode::Value);
    assert_eq!(labels(report.view.shaped.x()), vec!["A", "B"]);
    assert_eq!(single_y(&report.view.shaped), vec![15.0, 7.0]);
}

// ============================================================================
// DRILLING
// ============================================================================

#[test]
fn test_drill_into_category() {
    let mut harness = TestHarness::with_category_years();
    harness.set_spec(
        r#"{"mappings":{"x":"cat","y":"amt"},"format":{"title":"Spend","yTitle":"Amount"}}"#,
    );

    let report = harness.run(&["--drill", "A"]);
    assert_eq!(report.view.level, 1);
    assert_eq!(report.view.x_field, "yr");
    assert_eq!(labels(report.view.shaped.x()), vec!["2022", "2023"]);
    assert_eq!(single_y(&report.view.shaped), vec![10.0, 5.0]);
    assert_eq!(report.view.title, "Spend \u{2014} cat: A");
    assert_eq!(report.view.y_title, "Amount");
}

#[test]
fn test_drill_then_back_matches_main() {
    let mut harness = TestHarness::with_category_years();
    harness.set_spec(r#"{"mappings":{"x":"cat","y":"amt"}}"#);

    let main = harness.run(&[]);
    let round_trip = harness.run(&["--drill", "A", "--back", "1"]);
    assert_eq!(round_trip.view, main.view);
}

#[test]
fn test_explicit_path_from_flags() {
    let harness = TestHarness::with_sales_data();
    let report = harness.run(&[
        "--x", "Region", "--y", "Sales", "--drill-path", "Region,Product", "--drill", "North",
    ]);
    assert_eq!(report.drill_path, vec!["Region", "Product"]);
    assert!(!report.path_inferred);
    assert_eq!(report.view.x_field, "Product");
    assert_eq!(labels(report.view.shaped.x()), vec!["Gadget", "Widget"]);
    assert_eq!(single_y(&report.view.shaped), vec![1500.0, 2100.0]);
    assert!(!report.view.can_drill);
}

#[test]
fn test_drill_past_deepest_level_is_ignored() {
    let harness = TestHarness::with_sales_data();
    let report = harness.run(&[
        "--x", "Region", "--y", "Sales", "--drill-path", "Region,Product",
        "--drill", "North", "--drill", "Widget",
    ]);
    assert_eq!(report.view.level, 1);
}

#[test]
fn test_multi_series_by_quarter() {
    let harness = TestHarness::with_sales_data();
    let report = harness.run(&["--x", "Region", "--y", "Sales", "--color", "Quarter"]);
    let ShapedResult::Multi(multi) = &report.view.shaped else {
        panic!("expected multi series");
    };
    assert_eq!(labels(&multi.x), vec!["East", "North", "South"]);
    assert!(multi.is_aligned());
    assert_eq!(report.view.shaped.total(), SalesFixture::total_sales());
}

#[test]
fn test_pie_collapses_series() {
    let harness = TestHarness::with_sales_data();
    let report = harness.run(&[
        "--x", "Region", "--y", "Sales", "--color", "Quarter", "--chart-type", "pie",
    ]);
    let pie = report.pie.expect("pie slices");
    assert_eq!(pie.len(), 3);
    let total: f64 = pie.iter().map(|s| s.value).sum();
    assert_eq!(total, SalesFixture::total_sales());
}

#[test]
fn test_heatmap_matrix() {
    let harness = TestHarness::with_sales_data();
    let report = harness.run(&[
        "--x", "Region", "--y", "Quantity", "--color", "Product", "--chart-type", "heatmap",
    ]);
    let ShapedResult::Matrix(matrix) = &report.view.shaped else {
        panic!("expected matrix");
    };
    assert_eq!(matrix.z.len(), matrix.ys.len());
    assert!(matrix.z.iter().all(|row| row.len() == matrix.xs.len()));
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[test]
fn test_missing_x_is_reported() {
    let harness = TestHarness::with_sales_data();
    let err = harness.run_err(&["--y", "Sales"]);
    assert!(err.contains("mappings.x is required"), "{}", err);
}

#[test]
fn test_spec_file_completed_by_flags() {
    let mut harness = TestHarness::with_category_years();
    harness.set_spec(r#"{"mappings":{"y":"amt"},"chartType":"line"}"#);

    let report = harness.run(&["--x", "cat"]);
    assert_eq!(report.view.x_field, "cat");
    assert_eq!(single_y(&report.view.shaped), vec![15.0, 7.0]);

    let err = harness.run_err(&[]);
    assert!(err.contains("mappings.x is required"), "{}", err);
}

#[test]
fn test_malformed_spec_file_is_reported() {
    let mut harness = TestHarness::with_category_years();
    harness.set_spec("{");
    let err = harness.run_err(&["--x", "cat"]);
    assert!(err.contains("reading chart spec"), "{}", err);
}

#[test]
fn test_missing_y_for_mean_is_reported() {
    let harness = TestHarness::with_sales_data();
    let err = harness.run_err(&["--x", "Region", "--op", "mean"]);
    assert!(err.contains("mappings.y is required for the mean operator"), "{}", err);
}

#[test]
fn test_count_without_y() {
    let harness = TestHarness::with_sales_data();
    let report = harness.run(&["--x", "Region", "--op", "count"]);
    assert_eq!(single_y(&report.view.shaped), vec![2.0, 3.0, 3.0]);
}

#[test]
fn test_profiles_in_report() {
    let harness = TestHarness::with_sales_data();
    let report = harness.run(&["--x", "Region", "--y", "Sales", "--profile"]);
    let profiles = report.profiles.expect("profiles");
    assert!(profiles.get("Quarter").unwrap().is_temporal);
    assert!(profiles.get("Sales").unwrap().is_numeric);
}
