//! FILENAME: core/persistence/src/csv_reader.rs

use crate::PersistenceError;
use engine::{Dataset, ParseOptions};
use std::io::Read;
use std::path::Path;

/// Loads a dataset from a delimited-text file.
pub fn load_dataset(path: &Path, options: ParseOptions) -> Result<Dataset, PersistenceError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        PersistenceError::InvalidFormat(format!("{} is not valid UTF-8", path.display()))
    })?;
    log::debug!("read {} bytes from {}", text.len(), path.display());
    Ok(Dataset::from_text_with(&text, options))
}

/// Loads a dataset from any reader (stdin, a network body already fetched).
pub fn read_dataset<R: Read>(mut reader: R, options: ParseOptions) -> Result<Dataset, PersistenceError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| PersistenceError::InvalidFormat(format!("input is not valid UTF-8: {}", e)))?;
    Ok(Dataset::from_text_with(&text, options))
}
