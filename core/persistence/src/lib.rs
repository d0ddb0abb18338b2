//! FILENAME: core/persistence/src/lib.rs
//! Chart Data Persistence Module
//!
//! Handles loading datasets and chart configurations from files, and saving
//! exports, datasets and view settings back out.

mod csv_reader;
mod csv_writer;
mod error;
mod spec_loader;

pub use csv_reader::{load_dataset, read_dataset};
pub use csv_writer::{
    dataset_to_text, export_to_text, quote_field, save_dataset, save_export,
};
pub use error::PersistenceError;
pub use spec_loader::{
    load_view_options, read_chart_spec, save_view_options, SavedViewSettings,
};
