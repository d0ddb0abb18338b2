//! FILENAME: core/drill-engine/src/state.rs
//! Drill State - Navigation depth plus the filters chosen so far.
//!
//! A DrillState is a plain value. Transitions return a new state and leave
//! the receiver untouched; out-of-range transitions return an unchanged copy.
//! The level is always the number of filters, and `filters[i]` pairs with
//! `path[i]`.

use engine::{FieldFilter, Value};
use serde::{Deserialize, Serialize};

/// Separator between breadcrumb entries.
pub const BREADCRUMB_SEPARATOR: &str = " \u{2022} ";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillState {
    filters: Vec<FieldFilter>,
}

impl DrillState {
    /// Level 0, unfiltered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> usize {
        self.filters.len()
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// The filters that apply at `level` (the first `level` entries).
    pub fn filters_for(&self, level: usize) -> &[FieldFilter] {
        &self.filters[..level.min(self.filters.len())]
    }

    /// Whether `step_in` would take effect on `path`.
    pub fn can_step_in(&self, path: &[String]) -> bool {
        self.level() + 1 < path.len()
    }

    pub fn can_step_back(&self) -> bool {
        self.level() > 0
    }

    /// Selects `value` for the current level's field and descends one level.
    pub fn step_in(&self, path: &[String], value: Value) -> DrillState {
        if !self.can_step_in(path) {
            return self.clone();
        }
        let mut filters = self.filters.clone();
        filters.push(FieldFilter::new(path[self.level()].clone(), value));
        DrillState { filters }
    }

    /// Drops the last filter and ascends one level.
    pub fn step_back(&self) -> DrillState {
        let mut filters = self.filters.clone();
        filters.pop();
        DrillState { filters }
    }

    pub fn reset(&self) -> DrillState {
        DrillState::new()
    }

    /// `field: value` pairs for every active filter, bullet separated.
    pub fn breadcrumb(&self) -> String {
        self.filters
            .iter()
            .map(FieldFilter::to_string)
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR)
    }
}
