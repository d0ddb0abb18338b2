//! FILENAME: app/chart-cli/src/cli.rs
//! PURPOSE: Command-line surface of the chart shell.

use clap::{Parser, ValueEnum};
use drill_engine::ChartType;
use pivot_engine::{AggregationType, BarMode, SortMode};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartTypeArg {
    Bar,
    Line,
    Scatter,
    Pie,
    Heatmap,
}

impl From<ChartTypeArg> for ChartType {
    fn from(arg: ChartTypeArg) -> Self {
        match arg {
            ChartTypeArg::Bar => ChartType::Bar,
            ChartTypeArg::Line => ChartType::Line,
            ChartTypeArg::Scatter => ChartType::Scatter,
            ChartTypeArg::Pie => ChartType::Pie,
            ChartTypeArg::Heatmap => ChartType::Heatmap,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpArg {
    Sum,
    Mean,
    Count,
    Min,
    Max,
}

impl From<OpArg> for AggregationType {
    fn from(arg: OpArg) -> Self {
        match arg {
            OpArg::Sum => AggregationType::Sum,
            OpArg::Mean => AggregationType::Mean,
            OpArg::Count => AggregationType::Count,
            OpArg::Min => AggregationType::Min,
            OpArg::Max => AggregationType::Max,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Label,
    Value,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Label => SortMode::Label,
            SortArg::Value => SortMode::Value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BarModeArg {
    Group,
    Stack,
}

impl From<BarModeArg> for BarMode {
    fn from(arg: BarModeArg) -> Self {
        match arg {
            BarModeArg::Group => BarMode::Group,
            BarModeArg::Stack => BarMode::Stack,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for log::LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Open a chart over delimited text, drill into it and print the visible level as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "chart-cli", version, about)]
pub struct Args {
    /// Delimited text file to chart.
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Chart configuration (JSON). Mapping flags below override its fields.
    #[arg(long, value_name = "PATH")]
    pub spec: Option<PathBuf>,

    /// Field for the x axis (`mappings.x`).
    #[arg(long)]
    pub x: Option<String>,

    /// Value field (`mappings.y`).
    #[arg(long)]
    pub y: Option<String>,

    /// Series field (`mappings.color`).
    #[arg(long)]
    pub color: Option<String>,

    /// Reduction operator (`mappings.yOp`).
    #[arg(long, value_enum)]
    pub op: Option<OpArg>,

    #[arg(long = "chart-type", value_enum)]
    pub chart_type: Option<ChartTypeArg>,

    /// Explicit drill path, comma separated.
    #[arg(long = "drill-path", value_delimiter = ',')]
    pub drill_path: Vec<String>,

    /// Value to drill into at the next level (repeatable, applied in order).
    #[arg(long = "drill", value_name = "VALUE")]
    pub drill: Vec<String>,

    /// Step back this many levels after drilling.
    #[arg(long, default_value_t = 0)]
    pub back: usize,

    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    #[arg(long = "bar-mode", value_enum)]
    pub bar_mode: Option<BarModeArg>,

    /// Write the visible level as delimited text. A directory gets the
    /// configured file name.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Include the field profiles in the output.
    #[arg(long)]
    pub profile: bool,

    /// Saved view settings: read when present, written after the run.
    #[arg(long = "view-settings", value_name = "PATH")]
    pub view_settings: Option<PathBuf>,

    /// Field delimiter for input and export.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevelArg::Info)]
    pub log_level: LogLevelArg,

    /// Also write log lines to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
