//! FILENAME: core/engine/src/dataset.rs
//! PURPOSE: Typed rows and the immutable dataset built from one parse.
//! CONTEXT: The schema is derived once from the header. Rows store values
//! positionally; lookups go through the schema, where a duplicated header
//! name resolves to its LAST column (last write wins). Filtered subsets are
//! `RowSet`s that borrow rows from the dataset, never copies.

use crate::coerce::coerce;
use crate::filter::FieldFilter;
use crate::value::Value;
use parser::{ParseOptions, RawTable};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

static NULL: Value = Value::Null;

// ============================================================================
// SCHEMA
// ============================================================================

/// Column names in header order plus a name -> position index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    names: Vec<String>,
    positions: FxHashMap<String, usize>,
}

impl Schema {
    pub fn new(names: Vec<String>) -> Self {
        let mut positions = FxHashMap::default();
        for (i, name) in names.iter().enumerate() {
            // later columns overwrite earlier ones with the same name
            positions.insert(name.clone(), i);
        }
        Schema { names, positions }
    }

    /// Every header cell in column order, duplicates included.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Field names with duplicates removed, first occurrence order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.names.len());
        for name in &self.names {
            if !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        out
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.positions.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// ROW
// ============================================================================

/// One record. `values.len()` always equals the schema length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value_at(&self, position: usize) -> &Value {
        self.values.get(position).unwrap_or(&NULL)
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// The ordered, immutable collection of rows for one chart session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset from rows already shaped to `field_names`.
    /// Short rows are padded with Null and long rows truncated.
    pub fn new(field_names: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = field_names.len();
        let rows = rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, Value::Null);
                Row::new(values)
            })
            .collect();
        Dataset {
            schema: Schema::new(field_names),
            rows,
        }
    }

    /// Parses comma-delimited text into a dataset.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with(text, ParseOptions::default())
    }

    pub fn from_text_with(text: &str, options: ParseOptions) -> Self {
        let table = parser::parse_with(text, options);
        Self::from_raw(table)
    }

    /// Coerces a parsed table. Missing trailing cells become Null.
    pub fn from_raw(table: RawTable) -> Self {
        let diagnostics = &table.diagnostics;
        if diagnostics.unterminated_quote {
            log::warn!("unterminated quote closed at end of input");
        }
        if diagnostics.ragged_records > 0 {
            log::warn!(
                "{} record(s) do not match the header width of {}",
                diagnostics.ragged_records,
                table.headers.len()
            );
        }
        if !diagnostics.duplicate_headers.is_empty() {
            log::warn!(
                "duplicate header names, last column wins: {:?}",
                diagnostics.duplicate_headers
            );
        }

        let rows: Vec<Vec<Value>> = table
            .records
            .iter()
            .map(|record| record.iter().map(|cell| coerce(cell)).collect())
            .collect();

        let dataset = Dataset::new(table.headers, rows);
        log::debug!(
            "parsed dataset: {} rows x {} fields",
            dataset.len(),
            dataset.schema.len()
        );
        dataset
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The value of `field` in `row`, or Null when the field is unknown.
    pub fn get<'a>(&'a self, row: &'a Row, field: &str) -> &'a Value {
        match self.schema.position(field) {
            Some(position) => row.value_at(position),
            None => &NULL,
        }
    }

    /// A view over every row.
    pub fn all(&self) -> RowSet<'_> {
        RowSet {
            schema: &self.schema,
            rows: self.rows.iter().collect(),
        }
    }

    /// Rows matching every filter. Always scans the full dataset.
    pub fn filter(&self, filters: &[FieldFilter]) -> RowSet<'_> {
        let columns: Vec<(Column, &FieldFilter)> = filters
            .iter()
            .map(|f| (Column { position: self.schema.position(&f.field) }, f))
            .collect();

        let rows = self
            .rows
            .iter()
            .filter(|row| columns.iter().all(|(column, f)| f.accepts(column.read(row))))
            .collect();

        RowSet {
            schema: &self.schema,
            rows,
        }
    }
}

// ============================================================================
// ROW SET
// ============================================================================

/// A borrowed, ordered subset of a dataset's rows.
#[derive(Debug, Clone)]
pub struct RowSet<'a> {
    schema: &'a Schema,
    rows: Vec<&'a Row>,
}

impl<'a> RowSet<'a> {
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves `field` once; the returned accessor reads it from any row.
    pub fn column(&self, field: &str) -> Column {
        Column {
            position: self.schema.position(field),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.rows.iter().copied()
    }

    /// Keeps only the first `n` rows.
    pub fn take(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    /// Materializes rows as name -> value records for JSON output.
    pub fn records(&self) -> Vec<RowRecord<'a>> {
        self.rows
            .iter()
            .map(|row| RowRecord {
                schema: self.schema,
                row,
            })
            .collect()
    }
}

/// A field resolved against a schema. Unknown fields read as Null.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    position: Option<usize>,
}

impl Column {
    pub fn read<'r>(&self, row: &'r Row) -> &'r Value {
        match self.position {
            Some(p) => row.value_at(p),
            None => &NULL,
        }
    }
}

/// A row paired with its schema; serializes as an ordered JSON object.
#[derive(Debug, Clone, Copy)]
pub struct RowRecord<'a> {
    schema: &'a Schema,
    row: &'a Row,
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = self.schema.field_names();
        let mut map = serializer.serialize_map(Some(names.len()))?;
        for name in names {
            let value = self
                .schema
                .position(name)
                .map(|p| self.row.value_at(p))
                .unwrap_or(&NULL);
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
