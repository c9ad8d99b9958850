use super::value::Value;
use std::collections::BTreeMap;

/// Full result set of one query execution, held in memory for one
/// validation pass and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    /// Column names in result-set order
    columns: Vec<String>,
    /// Row-major cell data; every row has one cell per column
    rows: Vec<Vec<Value>>,
}

impl TableSnapshot {
    /// Build a snapshot, rejecting rows whose width does not match the header
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, SnapshotError> {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(SnapshotError::RowWidthMismatch {
                    row: idx,
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Snapshot with no rows and no columns (an empty result set)
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, top to bottom
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// One row as a column-name -> value record, for issue payloads
    pub fn row_record(&self, idx: usize) -> BTreeMap<String, Value> {
        self.columns
            .iter()
            .cloned()
            .zip(self.rows[idx].iter().cloned())
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("row {row} has {got} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },
}
