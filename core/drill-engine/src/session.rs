//! FILENAME: core/drill-engine/src/session.rs
//! Chart Session - One open chart: its data, configuration and navigation.
//!
//! A session owns its Dataset, the validated ChartSpec, the field profiles,
//! the drill path fixed at open time, the current DrillState and the
//! per-session ViewOptions. Nothing is shared between sessions.

use crate::definition::{ChartSpec, ConfigurationError};
use crate::engine::{calculate_level, filtered_rows};
use crate::state::DrillState;
use crate::view::LevelView;
use engine::{profile_fields, Dataset, FieldProfiles, RowSet, Value};
use pivot_engine::{BarMode, ExportTable, SortMode, ViewOptions};

#[derive(Debug, Clone)]
pub struct ChartSession {
    dataset: Dataset,
    spec: ChartSpec,
    profiles: FieldProfiles,
    drill_path: Vec<String>,
    path_inferred: bool,
    state: DrillState,
    options: ViewOptions,
}

impl ChartSession {
    /// Validates `spec`, profiles `dataset` and fixes the drill path.
    pub fn open(dataset: Dataset, spec: ChartSpec) -> Result<Self, ConfigurationError> {
        spec.validate()?;
        let profiles = profile_fields(&dataset, spec.drill_max_cats);
        let (drill_path, path_inferred) = spec.resolve_drill_path(&profiles)?;
        let options = spec.initial_view_options();

        log::info!(
            "chart session opened: {} rows, drill path [{}] ({})",
            dataset.len(),
            drill_path.join(", "),
            if path_inferred { "inferred" } else { "explicit" }
        );

        Ok(ChartSession {
            dataset,
            spec,
            profiles,
            drill_path,
            path_inferred,
            state: DrillState::new(),
            options,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn profiles(&self) -> &FieldProfiles {
        &self.profiles
    }

    pub fn drill_path(&self) -> &[String] {
        &self.drill_path
    }

    pub fn is_path_inferred(&self) -> bool {
        self.path_inferred
    }

    pub fn state(&self) -> &DrillState {
        &self.state
    }

    pub fn level(&self) -> usize {
        self.state.level()
    }

    pub fn view_options(&self) -> ViewOptions {
        self.options
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn can_step_in(&self) -> bool {
        self.state.can_step_in(&self.drill_path)
    }

    /// Drills into `value` of the current level's field. Returns whether the
    /// level changed.
    pub fn step_in(&mut self, value: Value) -> bool {
        let next = self.state.step_in(&self.drill_path, value);
        let moved = next != self.state;
        if moved {
            log::debug!("step in -> level {}", next.level());
        } else {
            log::debug!("step in ignored at deepest level {}", self.state.level());
        }
        self.state = next;
        moved
    }

    /// Returns whether the level changed.
    pub fn step_back(&mut self) -> bool {
        if !self.state.can_step_back() {
            return false;
        }
        self.state = self.state.step_back();
        log::debug!("step back -> level {}", self.state.level());
        true
    }

    pub fn reset(&mut self) {
        self.state = self.state.reset();
    }

    /// Rows visible at `level` under the current filters.
    pub fn filtered_rows(&self, level: usize) -> RowSet<'_> {
        filtered_rows(&self.dataset, &self.state, level)
    }

    // ------------------------------------------------------------------------
    // View options
    // ------------------------------------------------------------------------

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.options.sort_mode = mode;
    }

    pub fn set_bar_mode(&mut self, mode: BarMode) {
        self.options.bar_mode = mode;
    }

    pub fn toggle_sort(&mut self) {
        self.options.toggle_sort();
    }

    pub fn toggle_bar_mode(&mut self) {
        self.options.toggle_bar_mode();
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    /// The chart for the current level.
    pub fn current_view(&self) -> Result<LevelView, ConfigurationError> {
        calculate_level(
            &self.dataset,
            &self.spec,
            &self.drill_path,
            &self.state,
            &self.options,
        )
    }

    /// Flattened rows of the current level, ready for download.
    pub fn export(&self) -> Result<ExportTable, ConfigurationError> {
        Ok(self.current_view()?.export())
    }

    pub fn export_file_name(&self) -> String {
        self.spec.export_file_name()
    }
}
