//! Append-only issue journal
//!
//! One JSON object per line: `{"timestamp": <RFC 3339>, "issues": [...]}`.
//! The file is never rotated, truncated, or read back by this process.

use crate::checks::Issue;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Journal file written in the working directory
pub const DEFAULT_JOURNAL_PATH: &str = "data_quality_log.json";

/// One journal line
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    issues: &'a [Issue],
}

/// Append-only JSON-lines log of detected issues
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped entry for a run's issues
    pub fn append(&self, issues: &[Issue]) -> Result<(), JournalError> {
        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            issues,
        };
        let line = serde_json::to_string(&entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;

        Ok(())
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(DEFAULT_JOURNAL_PATH)
    }
}

/// Journal write failures; reported by the runner, never fatal
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("failed to serialize log entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write log entry: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_issues() -> Vec<Issue> {
        let mut counts = BTreeMap::new();
        counts.insert("name".to_string(), 2);
        vec![
            Issue::MissingValues(counts),
            Issue::Duplicates { count: 1 },
        ]
    }

    #[test]
    fn test_appends_one_line_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("log.json"));

        journal.append(&sample_issues()).unwrap();
        journal.append(&sample_issues()).unwrap();

        let contents = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_entry_schema() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("log.json"));
        journal.append(&sample_issues()).unwrap();

        let contents = std::fs::read_to_string(journal.path()).unwrap();
        let entry: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();

        assert!(entry["timestamp"].is_string());
        let issues = entry["issues"].as_array().unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0]["type"], "Missing Values");
        assert_eq!(issues[0]["details"]["name"], 2);
        assert_eq!(issues[1]["type"], "Duplicates");
        assert_eq!(issues[1]["details"]["count"], 1);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let journal = Journal::new("/nonexistent-dir/log.json");
        let err = journal.append(&sample_issues()).unwrap_err();
        assert!(matches!(err, JournalError::Io(_)));
    }
}
