//! FILENAME: core/pivot-engine/src/cache.rs
//! Group Cache - Internal representation used while aggregating.
//!
//! The cache is designed for:
//! - A single O(n) pass over the rows being aggregated
//! - Value interning, so group keys are small integer tuples
//! - First-seen ordering: ValueIds are assigned in the order values appear,
//!   which is exactly the insertion order the shaped output must preserve
//!
//! Architecture:
//! - Each grouping field has a FieldCache (Value <-> ValueId)
//! - Each (x, secondary) combination owns one AggregateAccumulator
//! - Combinations never seen have no accumulator and read as empty groups

use crate::definition::AggregationType;
use engine::{RowSet, Value};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

// ============================================================================
// VALUE INTERNING
// ============================================================================

/// A reference to an interned value within a field's unique value store.
pub type ValueId = u32;

/// Unique values of one grouping field, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FieldCache {
    value_to_id: FxHashMap<Value, ValueId>,
    id_to_value: Vec<Value>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a value and returns its ValueId.
    /// If the value already exists, returns the existing ID.
    pub fn intern(&mut self, value: &Value) -> ValueId {
        if let Some(&id) = self.value_to_id.get(value) {
            return id;
        }
        let id = self.id_to_value.len() as ValueId;
        self.id_to_value.push(value.clone());
        self.value_to_id.insert(value.clone(), id);
        id
    }

    pub fn unique_count(&self) -> usize {
        self.id_to_value.len()
    }

    pub fn values(&self) -> &[Value] {
        &self.id_to_value
    }

    pub fn into_values(self) -> Vec<Value> {
        self.id_to_value
    }
}

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Running state for every supported operator at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateAccumulator {
    pub sum: f64,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one row's numeric-coerced value.
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Computes the final aggregate value. Empty groups yield 0 for every
    /// operator, never an infinity sentinel.
    pub fn compute(&self, aggregation: AggregationType) -> f64 {
        match aggregation {
            AggregationType::Sum => self.sum,
            AggregationType::Count => self.count as f64,
            AggregationType::Mean => {
                if self.count > 0 {
                    self.sum / (self.count as f64)
                } else {
                    0.0
                }
            }
            AggregationType::Min => self.min.unwrap_or(0.0),
            AggregationType::Max => self.max.unwrap_or(0.0),
        }
    }

    /// Merges another accumulator into this one.
    pub fn merge(&mut self, other: &AggregateAccumulator) {
        if other.count == 0 {
            return;
        }
        self.sum += other.sum;
        self.count += other.count;
        if let Some(other_min) = other.min {
            self.min = Some(self.min.map_or(other_min, |m| m.min(other_min)));
        }
        if let Some(other_max) = other.max {
            self.max = Some(self.max.map_or(other_max, |m| m.max(other_max)));
        }
    }
}

// ============================================================================
// GROUP KEY
// ============================================================================

/// ValueIds of the grouping fields for one cell: `[x]` or `[x, secondary]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub values: SmallVec<[ValueId; 2]>,
}

impl GroupKey {
    pub fn single(x: ValueId) -> Self {
        GroupKey { values: smallvec![x] }
    }

    pub fn pair(x: ValueId, secondary: ValueId) -> Self {
        GroupKey {
            values: smallvec![x, secondary],
        }
    }
}

// ============================================================================
// GROUP CACHE
// ============================================================================

/// Rows grouped by x and an optional secondary field, one accumulator per cell.
#[derive(Debug, Clone, Default)]
pub struct GroupCache {
    pub x_axis: FieldCache,
    pub secondary_axis: Option<FieldCache>,
    cells: FxHashMap<GroupKey, AggregateAccumulator>,
    rows_seen: usize,
}

impl GroupCache {
    /// Builds the cache in one pass. Without `value_field` every row contributes 1.
    pub fn build(
        rows: &RowSet<'_>,
        x_field: &str,
        secondary_field: Option<&str>,
        value_field: Option<&str>,
    ) -> Self {
        let x_column = rows.column(x_field);
        let secondary_column = secondary_field.map(|f| rows.column(f));
        let value_column = value_field.map(|f| rows.column(f));

        let mut cache = GroupCache {
            secondary_axis: secondary_column.map(|_| FieldCache::new()),
            ..GroupCache::default()
        };

        for row in rows.iter() {
            let x_id = cache.x_axis.intern(x_column.read(row));
            let key = match (&secondary_column, cache.secondary_axis.as_mut()) {
                (Some(column), Some(axis)) => GroupKey::pair(x_id, axis.intern(column.read(row))),
                _ => GroupKey::single(x_id),
            };
            let value = match &value_column {
                Some(column) => column.read(row).numeric_or_zero(),
                None => 1.0,
            };
            cache.cells.entry(key).or_default().add(value);
            cache.rows_seen += 1;
        }

        cache
    }

    /// The operator's result for a cell; absent cells are empty groups.
    pub fn compute(&self, key: &GroupKey, aggregation: AggregationType) -> f64 {
        match self.cells.get(key) {
            Some(acc) => acc.compute(aggregation),
            None => AggregateAccumulator::new().compute(aggregation),
        }
    }

    /// Number of non-empty cells.
    pub fn group_count(&self) -> usize {
        self.cells.len()
    }

    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Accumulator over every row, regardless of grouping.
    pub fn grand_total(&self) -> AggregateAccumulator {
        let mut total = AggregateAccumulator::new();
        for acc in self.cells.values() {
            total.merge(acc);
        }
        total
    }
}
