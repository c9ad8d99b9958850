//! Data-quality issue records
//!
//! Issues serialize as `{"type": <kind>, "details": <payload>}`, the shape
//! written to the journal and rendered into notification emails.

use crate::data::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One detected data-quality problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum Issue {
    /// Per-column null counts; zero-count columns are included
    #[serde(rename = "Missing Values")]
    MissingValues(BTreeMap<String, usize>),

    /// Count of fully-duplicate rows (first occurrence not counted)
    #[serde(rename = "Duplicates")]
    Duplicates { count: usize },

    /// Full rows whose age falls outside the accepted range
    #[serde(rename = "Invalid Range")]
    InvalidRange(Vec<BTreeMap<String, Value>>),

    /// A text column whose longest value exceeds the length limit
    #[serde(rename = "String Length Exceeded")]
    StringLengthExceeded { column: String, max_length: usize },
}

impl Issue {
    /// Kind label, as written to the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Issue::MissingValues(_) => "Missing Values",
            Issue::Duplicates { .. } => "Duplicates",
            Issue::InvalidRange(_) => "Invalid Range",
            Issue::StringLengthExceeded { .. } => "String Length Exceeded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_wire_shape() {
        let mut counts = BTreeMap::new();
        counts.insert("age".to_string(), 0);
        counts.insert("name".to_string(), 2);

        let json = serde_json::to_value(Issue::MissingValues(counts)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Missing Values",
                "details": {"age": 0, "name": 2}
            })
        );
    }

    #[test]
    fn test_duplicates_wire_shape() {
        let json = serde_json::to_value(Issue::Duplicates { count: 3 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Duplicates", "details": {"count": 3}})
        );
    }

    #[test]
    fn test_invalid_range_wire_shape() {
        let mut record = BTreeMap::new();
        record.insert("age".to_string(), Value::Int64(-5));
        record.insert("name".to_string(), Value::String("bob".into()));

        let json = serde_json::to_value(Issue::InvalidRange(vec![record])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Invalid Range",
                "details": [{"age": -5, "name": "bob"}]
            })
        );
    }

    #[test]
    fn test_string_length_wire_shape() {
        let json = serde_json::to_value(Issue::StringLengthExceeded {
            column: "bio".to_string(),
            max_length: 300,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "String Length Exceeded",
                "details": {"column": "bio", "max_length": 300}
            })
        );
    }
}
