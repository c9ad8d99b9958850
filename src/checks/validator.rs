//! The fixed battery of data-quality checks
//!
//! Every check runs on every snapshot, independently of the others; issues
//! accumulate in a fixed order (missing values, duplicates, range, string
//! length). Checks are total functions over the snapshot and cannot fail.

use super::issue::Issue;
use crate::data::TableSnapshot;
use std::collections::{BTreeMap, HashSet};

/// Column checked for out-of-range values, when present
const AGE_COLUMN: &str = "age";
/// Inclusive bounds for a plausible age
const AGE_MIN: f64 = 0.0;
const AGE_MAX: f64 = 120.0;
/// Longest accepted string value, in characters
const MAX_TEXT_CHARS: usize = 255;

/// Run all checks over a snapshot, in order
pub fn validate(snapshot: &TableSnapshot) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(issue) = check_missing_values(snapshot) {
        issues.push(issue);
    }
    if let Some(issue) = check_duplicates(snapshot) {
        issues.push(issue);
    }
    if let Some(issue) = check_age_range(snapshot) {
        issues.push(issue);
    }
    issues.extend(check_string_lengths(snapshot));

    issues
}

/// Per-column null counts; one issue if any column has a null.
/// The payload includes every column, zero counts included.
fn check_missing_values(snapshot: &TableSnapshot) -> Option<Issue> {
    let counts: BTreeMap<String, usize> = snapshot
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let nulls = snapshot.column_values(idx).filter(|v| v.is_null()).count();
            (name.clone(), nulls)
        })
        .collect();

    if counts.values().any(|&n| n > 0) {
        Some(Issue::MissingValues(counts))
    } else {
        None
    }
}

/// Count rows equal to an earlier row, by full-row equality
fn check_duplicates(snapshot: &TableSnapshot) -> Option<Issue> {
    let mut seen = HashSet::new();
    let count = snapshot
        .rows()
        .iter()
        .filter(|row| !seen.insert(row.as_slice()))
        .count();

    if count > 0 {
        Some(Issue::Duplicates { count })
    } else {
        None
    }
}

/// Rows whose age is outside [0, 120], reported in full.
/// Null and non-numeric cells are not flagged.
fn check_age_range(snapshot: &TableSnapshot) -> Option<Issue> {
    let age_idx = snapshot.column_index(AGE_COLUMN)?;

    let offending: Vec<BTreeMap<String, crate::data::Value>> = snapshot
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row[age_idx]
                .as_f64()
                .map(|age| age < AGE_MIN || age > AGE_MAX)
                .unwrap_or(false)
        })
        .map(|(idx, _)| snapshot.row_record(idx))
        .collect();

    if offending.is_empty() {
        None
    } else {
        Some(Issue::InvalidRange(offending))
    }
}

/// One issue per text column whose longest value exceeds the limit.
/// A column counts as text only when it holds at least one string and
/// nothing but strings besides nulls. Length is counted in characters.
fn check_string_lengths(snapshot: &TableSnapshot) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (idx, name) in snapshot.columns().iter().enumerate() {
        let mut max_chars = 0usize;
        let mut saw_string = false;
        let mut saw_other = false;

        for value in snapshot.column_values(idx) {
            match value.as_str() {
                Some(s) => {
                    saw_string = true;
                    max_chars = max_chars.max(s.chars().count());
                }
                None if value.is_null() => {}
                None => saw_other = true,
            }
        }

        if saw_string && !saw_other && max_chars > MAX_TEXT_CHARS {
            issues.push(Issue::StringLengthExceeded {
                column: name.clone(),
                max_length: max_chars,
            });
        }
    }

    issues
}
