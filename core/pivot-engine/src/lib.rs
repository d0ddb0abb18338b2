//! FILENAME: core/pivot-engine/src/lib.rs
//! Aggregation subsystem for the chart data engine.
//!
//! This crate turns sets of rows into chart-ready results. It depends on
//! `engine` only for shared types (Value, RowSet, FieldFilter).
//!
//! Layers:
//! - `definition`: Serializable configuration (operator, sort and bar modes)
//! - `cache`: Internal grouped representation (HOW we compute)
//! - `view`: Chart-ready output for the renderer (WHAT we display)
//! - `engine`: Aggregation and pivot calculation
//! - `materialize`: Sort policy and export flattening

pub mod definition;
pub mod cache;
pub mod view;
pub mod engine;
pub mod materialize;

pub use definition::*;
pub use cache::*;
pub use view::*;
pub use crate::engine::{aggregate, pivot};
pub use materialize::{flatten_for_export, sort_result, SERIES_COLUMN, VALUE_COLUMN};
