//! FILENAME: core/engine/src/profile.rs
//! PURPOSE: Classifies each field of a dataset as numeric / temporal / categorical.
//! CONTEXT: Profiles are derived once from a bounded sample of the dataset
//! and feed drill-path inference. They are heuristics: a small integer code
//! column is both numeric and categorical. A profile belongs to the dataset
//! it was computed from and is recomputed, never patched, when that changes.

use crate::dataset::Dataset;
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Rows inspected per profile.
pub const PROFILE_SAMPLE_LIMIT: usize = 5000;

/// Default categorical cardinality threshold (`drillMaxCats`).
pub const DEFAULT_MAX_CATEGORIES: usize = 30;

/// A numeric field named like a year only counts as temporal up to this many distinct values.
const MAX_YEAR_DISTINCT: usize = 50;

static YEAR_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(year|yr)$").expect("valid year pattern"));
static DATE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(date|month|quarter)").expect("valid date pattern"));

/// Profile of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProfile {
    pub distinct_count: usize,
    pub is_numeric: bool,
    pub is_temporal: bool,
    pub is_categorical: bool,
}

/// Profiles for every field, in schema (first occurrence) order.
/// Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProfiles {
    entries: Vec<(String, FieldProfile)>,
}

impl FieldProfiles {
    pub fn get(&self, field: &str) -> Option<&FieldProfile> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, profile)| profile)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldProfile)> {
        self.entries.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldProfiles {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, profile) in &self.entries {
            map.serialize_entry(name, profile)?;
        }
        map.end()
    }
}

/// Profiles `dataset` with categorical threshold `max_categories`.
pub fn profile_fields(dataset: &Dataset, max_categories: usize) -> FieldProfiles {
    let sample = dataset.all().take(PROFILE_SAMPLE_LIMIT);

    let entries: Vec<(String, FieldProfile)> = dataset
        .schema()
        .field_names()
        .into_iter()
        .map(|name| {
            let column = sample.column(name);
            let mut distinct: FxHashSet<&Value> = FxHashSet::default();
            let mut all_numeric = true;
            for row in sample.iter() {
                let value = column.read(row);
                all_numeric &= matches!(value, Value::Number(n) if n.is_finite());
                distinct.insert(value);
            }
            let profile = classify(name, distinct.len(), all_numeric, max_categories);
            (name.to_string(), profile)
        })
        .collect();

    log::debug!(
        "profiled {} fields over {} sampled rows",
        entries.len(),
        sample.len()
    );
    FieldProfiles { entries }
}

fn classify(name: &str, distinct_count: usize, is_numeric: bool, max_categories: usize) -> FieldProfile {
    let looks_like_year =
        is_numeric && distinct_count <= MAX_YEAR_DISTINCT && YEAR_NAME.is_match(name);
    FieldProfile {
        distinct_count,
        is_numeric,
        is_temporal: looks_like_year || DATE_NAME.is_match(name),
        is_categorical: !is_numeric || distinct_count <= max_categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sales() -> Dataset {
        let mut text = String::from("region,fiscal_year,order_date,amount,code\n");
        for i in 0..40 {
            let region = ["North", "South", "East"][i % 3];
            let year = 2020 + (i % 4);
            text.push_str(&format!("{},{},2024-01-{:02},{},{}\n", region, year, i % 28 + 1, i * 10, i % 5));
        }
        Dataset::from_text(&text)
    }

    #[test]
    fn classifies_fields() {
        let profiles = profile_fields(&sales(), DEFAULT_MAX_CATEGORIES);

        assert_eq!(
            profiles.get("region"),
            Some(&FieldProfile { distinct_count: 3, is_numeric: false, is_temporal: false, is_categorical: true })
        );
        assert_eq!(
            profiles.get("fiscal_year"),
            Some(&FieldProfile { distinct_count: 4, is_numeric: true, is_temporal: true, is_categorical: true })
        );
        let date = profiles.get("order_date").unwrap();
        assert!(date.is_temporal && !date.is_numeric && date.is_categorical);
        let amount = profiles.get("amount").unwrap();
        assert!(amount.is_numeric && !amount.is_categorical);
        let code = profiles.get("code").unwrap();
        assert!(code.is_numeric && code.is_categorical);
    }

    #[test]
    fn threshold_controls_categorical() {
        let profiles = profile_fields(&sales(), 3);
        assert!(!profiles.get("fiscal_year").unwrap().is_categorical);
        // non-numeric fields stay categorical regardless of cardinality
        assert!(profiles.get("order_date").unwrap().is_categorical);
    }

    #[test]
    fn year_suffix_requires_numeric() {
        let ds = Dataset::from_text("yr,label_year\n2020,a\n2021,b\n");
        let profiles = profile_fields(&ds, DEFAULT_MAX_CATEGORIES);
        assert!(profiles.get("yr").unwrap().is_temporal);
        assert!(!profiles.get("label_year").unwrap().is_temporal);
    }

    #[test]
    fn mixed_column_is_not_numeric() {
        let ds = Dataset::from_text("v\n1\n\n2\n");
        // the blank middle line is a row of nulls
        let profile = profile_fields(&ds, DEFAULT_MAX_CATEGORIES);
        assert!(!profile.get("v").unwrap().is_numeric);
        assert_eq!(profile.get("v").unwrap().distinct_count, 3);
    }

    #[test]
    fn order_follows_schema() {
        let profiles = profile_fields(&sales(), DEFAULT_MAX_CATEGORIES);
        let names: Vec<&str> = profiles.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["region", "fiscal_year", "order_date", "amount", "code"]);
    }
}
