//! FILENAME: core/drill-engine/src/lib.rs
//! Drill-down subsystem for the chart data engine.
//!
//! This crate provides chart configuration and drill navigation. It depends
//! on `pivot-engine` for aggregation, sorting and export, and on `engine`
//! for the data model, profiling and drill-path inference.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the chart IS)
//! - `state`: Pure drill navigation state and its transitions
//! - `engine`: Per-level calculation (HOW we calculate)
//! - `view`: Level output for the renderer (WHAT we display)
//! - `session`: One open chart owning its data and state

pub mod definition;
pub mod state;
pub mod view;
pub mod engine;
pub mod session;

pub use definition::*;
pub use state::DrillState;
pub use view::{compose_title, LevelView};
pub use crate::engine::{calculate_level, filtered_rows, x_field_for_level};
pub use session::ChartSession;
