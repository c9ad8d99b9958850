//! Vigil: scheduled data-quality checks over a SQL table
//!
//! A single-process batch watchdog. On a fixed interval it fetches one table
//! from the configured database, runs a fixed battery of quality checks over
//! the in-memory snapshot, appends any issues to an append-only JSON-lines
//! journal, and sends them to a human over SMTP.
//!
//! # Checks
//!
//! - **Missing Values**: per-column null counts
//! - **Duplicates**: fully-duplicate row count
//! - **Invalid Range**: rows whose `age` falls outside [0, 120]
//! - **String Length Exceeded**: text columns with values over 255 characters
//!
//! # Example
//!
//! ```
//! use vigil::checks::validate;
//! use vigil::data::{TableSnapshot, Value};
//!
//! let snapshot = TableSnapshot::new(
//!     vec!["age".to_string()],
//!     vec![vec![Value::Int64(130)], vec![Value::Int64(30)]],
//! )
//! .unwrap();
//!
//! let issues = validate(&snapshot);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind(), "Invalid Range");
//! ```

pub mod audit;
pub mod checks;
pub mod config;
pub mod data;
pub mod fetch;
pub mod notify;
pub mod runner;

// Re-export commonly used types
pub use audit::{Journal, JournalError};
pub use checks::{validate, Issue};
pub use config::{Config, ConfigError, SmtpConfig};
pub use data::{TableSnapshot, Value};
pub use fetch::{DataFetcher, FetchError};
pub use notify::{EmailNotifier, NotifyError};
pub use runner::{Pipeline, Scheduler};
