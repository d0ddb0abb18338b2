//! FILENAME: app/chart-cli/src/commands.rs
//! PURPOSE: The chart shell's command: open a session, navigate, report.
//! CONTEXT: Everything here is a thin layer over `ChartSession`; the engine
//! crates own all data semantics.

use crate::cli::Args;
use crate::{log_enter, log_exit, log_info, log_warn};
use anyhow::{Context, Result};
use drill_engine::{ChartSession, ChartSpec, LevelView};
use engine::{coerce, FieldProfiles, ParseOptions};
use pivot_engine::{PieSlice, ViewOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// REPORT
// ============================================================================

/// What the command prints to stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub drill_path: Vec<String>,
    pub path_inferred: bool,
    pub view: LevelView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie: Option<Vec<PieSlice>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<FieldProfiles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_to: Option<PathBuf>,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Builds the chart configuration from `--spec` plus the mapping flags.
pub fn resolve_spec(args: &Args) -> Result<ChartSpec> {
    let mut spec = match &args.spec {
        Some(path) => persistence::read_chart_spec(path)
            .with_context(|| format!("reading chart spec {}", path.display()))?,
        None => ChartSpec::default(),
    };

    if let Some(x) = &args.x {
        spec.mappings.x = Some(x.clone());
    }
    if let Some(y) = &args.y {
        spec.mappings.y = Some(y.clone());
    }
    if let Some(color) = &args.color {
        spec.mappings.color = Some(color.clone());
    }
    if let Some(op) = args.op {
        spec.mappings.y_op = op.into();
    }
    if let Some(chart_type) = args.chart_type {
        spec.chart_type = chart_type.into();
    }
    if !args.drill_path.is_empty() {
        spec.drilldown.path = Some(args.drill_path.clone());
    }
    Ok(spec)
}

/// Opens a session over `--data` with the resolved configuration.
pub fn open_session(args: &Args) -> Result<ChartSession> {
    log_enter!("CMD", "open_session", "data={}", args.data.display());
    let spec = resolve_spec(args)?;
    let options = ParseOptions {
        delimiter: args.delimiter,
    };
    let dataset = persistence::load_dataset(&args.data, options)
        .with_context(|| format!("loading data {}", args.data.display()))?;
    let session = ChartSession::open(dataset, spec).context("invalid chart configuration")?;
    log_exit!("CMD", "open_session", "path_len={}", session.drill_path().len());
    Ok(session)
}

/// Applies view settings: saved file first, then explicit flags.
fn apply_view_options(session: &mut ChartSession, args: &Args) -> Result<()> {
    if let Some(path) = args.view_settings.as_deref().filter(|p| p.exists()) {
        let saved: ViewOptions = persistence::load_view_options(path)
            .with_context(|| format!("loading view settings {}", path.display()))?;
        session.set_sort_mode(saved.sort_mode);
        session.set_bar_mode(saved.bar_mode);
    }
    if let Some(sort) = args.sort {
        session.set_sort_mode(sort.into());
    }
    if let Some(bar_mode) = args.bar_mode {
        session.set_bar_mode(bar_mode.into());
    }
    Ok(())
}

/// Drills through `--drill` values in order, then steps back `--back` levels.
fn navigate(session: &mut ChartSession, args: &Args) {
    for raw in &args.drill {
        if !session.step_in(coerce(raw)) {
            log_warn!("CMD", "drill into {:?} ignored at deepest level {}", raw, session.level());
        }
    }
    for _ in 0..args.back {
        session.step_back();
    }
}

/// Where an export lands: a directory gets the configured file name.
pub fn export_target(requested: &Path, session: &ChartSession) -> PathBuf {
    if requested.is_dir() {
        requested.join(session.export_file_name())
    } else {
        requested.to_path_buf()
    }
}

/// Runs one invocation end to end and returns the report.
pub fn execute(args: &Args) -> Result<RunReport> {
    let mut session = open_session(args)?;
    apply_view_options(&mut session, args)?;
    navigate(&mut session, args);

    let view = session.current_view().context("calculating chart level")?;
    log_info!(
        "CMD",
        "level {} of {}: x={} rows={}",
        view.level,
        view.depth,
        view.x_field,
        view.row_count
    );

    let exported_to = match &args.export {
        Some(requested) => {
            let target = export_target(requested, &session);
            persistence::save_export(&view.export(), &target, args.delimiter)
                .with_context(|| format!("writing export {}", target.display()))?;
            Some(target)
        }
        None => None,
    };

    if let Some(path) = &args.view_settings {
        persistence::save_view_options(&session.view_options(), path)
            .with_context(|| format!("saving view settings {}", path.display()))?;
    }

    let pie = (view.chart_type == drill_engine::ChartType::Pie).then(|| view.pie_slices());

    Ok(RunReport {
        drill_path: session.drill_path().to_vec(),
        path_inferred: session.is_path_inferred(),
        profiles: args.profile.then(|| session.profiles().clone()),
        pie,
        exported_to,
        view,
    })
}
