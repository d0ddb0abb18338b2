//! FILENAME: core/persistence/src/csv_writer.rs
//! Delimited-text output. Every cell is double-quoted with embedded quotes
//! doubled, so the text reads back through the same parser unchanged.

use crate::PersistenceError;
use engine::{Dataset, Value};
use pivot_engine::ExportTable;
use std::path::Path;

const LINE_END: &str = "\n";

/// `"text"` with every `"` doubled.
pub fn quote_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn write_record<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, delimiter: char) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(&quote_field(cell));
    }
}

fn write_values(out: &mut String, values: &[Value], delimiter: char) {
    let texts: Vec<String> = values.iter().map(Value::canonical_text).collect();
    write_record(out, texts.iter().map(String::as_str), delimiter);
}

/// Serializes an export table: header then one line per row, lines joined
/// by `\n`. A table without rows serializes to the empty string.
pub fn export_to_text(table: &ExportTable, delimiter: char) -> String {
    if table.rows.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    write_record(&mut out, table.columns.iter().map(String::as_str), delimiter);
    for row in &table.rows {
        out.push_str(LINE_END);
        write_values(&mut out, row, delimiter);
    }
    out
}

/// Serializes a whole dataset, header included, one terminated line per row.
pub fn dataset_to_text(dataset: &Dataset, delimiter: char) -> String {
    let mut out = String::new();
    if dataset.schema().is_empty() {
        return out;
    }
    write_record(&mut out, dataset.schema().names().iter().map(String::as_str), delimiter);
    out.push_str(LINE_END);
    for row in dataset.rows() {
        write_values(&mut out, row.values(), delimiter);
        out.push_str(LINE_END);
    }
    out
}

pub fn save_export(table: &ExportTable, path: &Path, delimiter: char) -> Result<(), PersistenceError> {
    std::fs::write(path, export_to_text(table, delimiter))?;
    log::info!("exported {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

pub fn save_dataset(dataset: &Dataset, path: &Path, delimiter: char) -> Result<(), PersistenceError> {
    std::fs::write(path, dataset_to_text(dataset, delimiter))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_everything() {
        assert_eq!(quote_field("d\"e"), "\"d\"\"e\"");
        assert_eq!(quote_field(""), "\"\"");
    }

    #[test]
    fn export_text_layout() {
        let table = ExportTable {
            columns: vec!["cat".into(), "value".into()],
            rows: vec![
                vec![Value::text("A"), Value::Number(15.0)],
                vec![Value::text("say \"hi\""), Value::Number(2.5)],
            ],
        };
        assert_eq!(
            export_to_text(&table, ','),
            "\"cat\",\"value\"\n\"A\",\"15\"\n\"say \"\"hi\"\"\",\"2.5\""
        );
    }

    #[test]
    fn empty_export_is_empty_text() {
        let table = ExportTable {
            columns: vec!["cat".into(), "value".into()],
            rows: vec![],
        };
        assert_eq!(export_to_text(&table, ','), "");
    }

    #[test]
    fn null_cells_are_empty_quotes() {
        let ds = Dataset::new(vec!["a".into(), "b".into()], vec![vec![Value::Null, Value::Boolean(true)]]);
        assert_eq!(dataset_to_text(&ds, ';'), "\"a\";\"b\"\n\"\";\"true\"\n");
    }
}
