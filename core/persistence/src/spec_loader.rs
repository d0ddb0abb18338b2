//! FILENAME: core/persistence/src/spec_loader.rs
//! Chart configuration and saved view settings as JSON files.

use crate::PersistenceError;
use drill_engine::ChartSpec;
use pivot_engine::ViewOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reads a chart configuration without validating it, so callers can
/// layer overrides first. `ChartSession::open` validates the result.
pub fn read_chart_spec(path: &Path) -> Result<ChartSpec, PersistenceError> {
    let json = std::fs::read_to_string(path)?;
    let spec: ChartSpec = serde_json::from_str(&json)?;
    log::debug!("read chart spec {}", path.display());
    Ok(spec)
}

// ============================================================================
// SAVED VIEW SETTINGS
// ============================================================================

/// Per-user view settings saved between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedViewSettings {
    pub version: u32,
    #[serde(flatten)]
    pub options: ViewOptions,
}

impl SavedViewSettings {
    pub fn new(options: ViewOptions) -> Self {
        Self { version: 1, options }
    }
}

pub fn save_view_options(options: &ViewOptions, path: &Path) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(&SavedViewSettings::new(*options))?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_view_options(path: &Path) -> Result<ViewOptions, PersistenceError> {
    let json = std::fs::read_to_string(path)?;
    let saved: SavedViewSettings = serde_json::from_str(&json)?;
    Ok(saved.options)
}
