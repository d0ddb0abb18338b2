//! FILENAME: core/engine/src/drill_path.rs
//! PURPOSE: Infers the ordered list of fields a user drills through.
//! CONTEXT: Used only when the chart configuration names no explicit path.
//!
//! ALGORITHM (each stage appends unused fields, candidates within a stage
//! sorted ascending by distinct count, ties in profile order):
//! 1. the primary x field, categorical or not
//! 2. temporal + categorical fields with at least 2 distinct values
//! 3. the color field, if categorical
//! 4. every other categorical field with at least 2 distinct values

use crate::profile::{FieldProfile, FieldProfiles};

/// Infers a drill path. A path of length 1 means no drill is possible.
pub fn infer_drill_path(
    profiles: &FieldProfiles,
    x_field: &str,
    color_field: Option<&str>,
) -> Vec<String> {
    let mut path: Vec<String> = vec![x_field.to_string()];

    append_ranked(&mut path, profiles, |p| {
        p.is_temporal && p.is_categorical && p.distinct_count >= 2
    });

    if let Some(color) = color_field {
        let categorical = profiles.get(color).is_some_and(|p| p.is_categorical);
        if categorical && !path.iter().any(|f| f == color) {
            path.push(color.to_string());
        }
    }

    append_ranked(&mut path, profiles, |p| {
        p.is_categorical && p.distinct_count >= 2
    });

    dedup_preserving_order(path)
}

fn append_ranked(
    path: &mut Vec<String>,
    profiles: &FieldProfiles,
    predicate: impl Fn(&FieldProfile) -> bool,
) {
    let mut candidates: Vec<(&str, usize)> = profiles
        .iter()
        .filter(|(name, profile)| !path.iter().any(|f| f == name) && predicate(profile))
        .map(|(name, profile)| (name, profile.distinct_count))
        .collect();
    // stable: equal counts keep profile order
    candidates.sort_by_key(|(_, distinct)| *distinct);
    path.extend(candidates.into_iter().map(|(name, _)| name.to_string()));
}

fn dedup_preserving_order(path: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(path.len());
    for field in path {
        if !out.contains(&field) {
            out.push(field);
        }
    }
    out
}
