//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for chart shell integration tests.

#![allow(dead_code)]

use chart_cli_lib::{execute, Args, RunReport};
use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding the data file and chart spec of one test.
pub struct TestHarness {
    pub dir: TempDir,
    pub data_path: PathBuf,
    pub spec_path: Option<PathBuf>,
}

impl TestHarness {
    /// Harness over the given delimited text.
    pub fn with_data(text: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let data_path = dir.path().join("data.csv");
        std::fs::write(&data_path, text).expect("write data");
        TestHarness {
            dir,
            data_path,
            spec_path: None,
        }
    }

    /// Harness over the sales fixture.
    pub fn with_sales_data() -> Self {
        Self::with_data(&SalesFixture::csv())
    }

    /// Harness over the three-row category/year fixture.
    pub fn with_category_years() -> Self {
        Self::with_data("cat,yr,amt\r\nA,2022,10\r\nA,2023,5\r\nB,2022,7\r\n")
    }

    /// Writes a chart spec JSON file used by subsequent runs.
    pub fn set_spec(&mut self, json: &str) {
        let path = self.dir.path().join("spec.json");
        std::fs::write(&path, json).expect("write spec");
        self.spec_path = Some(path);
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Parses `extra` as command-line flags on top of `--data` and `--spec`.
    pub fn args(&self, extra: &[&str]) -> Args {
        let mut argv: Vec<String> = vec![
            "chart-cli".into(),
            "--data".into(),
            self.data_path.display().to_string(),
            "--log-level".into(),
            "off".into(),
        ];
        if let Some(spec) = &self.spec_path {
            argv.push("--spec".into());
            argv.push(spec.display().to_string());
        }
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).expect("valid arguments")
    }

    /// Runs the command and returns its report.
    pub fn run(&self, extra: &[&str]) -> RunReport {
        execute(&self.args(extra)).expect("command succeeds")
    }

    /// Runs the command and returns the error text.
    pub fn run_err(&self, extra: &[&str]) -> String {
        match execute(&self.args(extra)) {
            Ok(report) => panic!("expected failure, got {:?}", report),
            Err(e) => format!("{:#}", e),
        }
    }
}

/// Regional sales fixture used by several tests.
pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Region", "Product", "Quarter", "Sales", "Quantity"]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ("North", "Widget", "Q1", 1000.0, 10.0),
            ("North", "Gadget", "Q1", 1500.0, 15.0),
            ("South", "Widget", "Q1", 800.0, 8.0),
            ("South", "Gadget", "Q2", 1200.0, 12.0),
            ("North", "Widget", "Q2", 1100.0, 11.0),
            ("East", "Gizmo", "Q2", 500.0, 5.0),
            ("South", "Widget", "Q3", 900.0, 9.0),
            ("East", "Widget", "Q3", 700.0, 7.0),
        ]
    }

    pub fn csv() -> String {
        let mut text = Self::headers().join(",");
        text.push('\n');
        for (region, product, quarter, sales, quantity) in Self::data() {
            text.push_str(&format!("{},{},{},{},{}\n", region, product, quarter, sales, quantity));
        }
        text
    }

    pub fn total_sales() -> f64 {
        Self::data().iter().map(|row| row.3).sum()
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read output")
}
