//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the chart data engine.
//! CONTEXT: Owns the shared data model (typed values, rows, datasets) and the
//! lower half of the pipeline: type coercion, field profiling and drill-path
//! inference. Aggregation lives in `pivot-engine`, navigation in `drill-engine`.

pub mod coerce;
pub mod dataset;
pub mod drill_path;
pub mod filter;
pub mod profile;
pub mod value;

// Re-export commonly used types at the crate root
pub use coerce::coerce;
pub use dataset::{Column, Dataset, Row, RowRecord, RowSet, Schema};
pub use drill_path::infer_drill_path;
pub use filter::FieldFilter;
pub use parser::ParseOptions;
pub use profile::{
    profile_fields, FieldProfile, FieldProfiles, DEFAULT_MAX_CATEGORIES, PROFILE_SAMPLE_LIMIT,
};
pub use value::Value;
