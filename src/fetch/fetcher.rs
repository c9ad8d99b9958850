//! Database access
//!
//! One fixed `SELECT *` per run, decoded into a [`TableSnapshot`]. The pool
//! is created lazily at startup and held for the process lifetime; the first
//! real connection happens on the first run.

use super::retry::{retry_async, RetryError};
use crate::data::{SnapshotError, TableSnapshot, Value};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Column, Row, ValueRef};
use std::sync::Once;
use std::time::Duration;

/// Attempts per run, including the first
pub const FETCH_ATTEMPTS: usize = 3;
/// Fixed delay between attempts
pub const FETCH_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Fetches the watched table as an in-memory snapshot
pub struct DataFetcher {
    pool: AnyPool,
    query: String,
}

impl DataFetcher {
    /// Create a lazily-connecting pool for the given URI.
    /// Fails on an unparseable URI, not on an unreachable server.
    pub fn new(database_uri: &str, table: &str) -> Result<Self, FetchError> {
        // Driver registration is process-global and must happen exactly once.
        static DRIVERS: Once = Once::new();
        DRIVERS.call_once(sqlx::any::install_default_drivers);
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect_lazy(database_uri)?;

        Ok(Self {
            pool,
            query: format!("SELECT * FROM {table}"),
        })
    }

    /// The fixed query this fetcher runs
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The underlying pool, held for the process lifetime
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Fetch the full table, retrying on any database failure
    pub async fn fetch_snapshot(&self) -> Result<TableSnapshot, FetchError> {
        retry_async(FETCH_ATTEMPTS, FETCH_RETRY_DELAY, || self.fetch_once())
            .await
            .map_err(FetchError::from)
    }

    async fn fetch_once(&self) -> Result<TableSnapshot, FetchError> {
        let rows = sqlx::query(&self.query).fetch_all(&self.pool).await?;

        let Some(first) = rows.first() else {
            return Ok(TableSnapshot::empty());
        };
        let columns: Vec<String> = first
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut data = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut cells = Vec::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                cells.push(decode_cell(row, idx, name)?);
            }
            data.push(cells);
        }

        Ok(TableSnapshot::new(columns, data)?)
    }
}

/// Decode one cell: null first, then the supported scalar types in order
fn decode_cell(row: &AnyRow, idx: usize, column: &str) -> Result<Value, FetchError> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    if let Ok(v) = row.try_get::<i64, _>(idx) {
        return Ok(Value::Int64(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(idx) {
        return Ok(Value::Float64(v));
    }
    if let Ok(v) = row.try_get::<bool, _>(idx) {
        return Ok(Value::Bool(v));
    }
    if let Ok(v) = row.try_get::<String, _>(idx) {
        return Ok(Value::String(v));
    }

    Err(FetchError::Decode {
        column: column.to_string(),
    })
}

/// Fetch failures; `Exhausted` wraps the last error after all retries
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("column {column:?} holds a value outside the supported types")]
    Decode { column: String },

    #[error("malformed result set: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("fetch failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: usize,
        #[source]
        source: Box<FetchError>,
    },
}

impl From<RetryError<FetchError>> for FetchError {
    fn from(err: RetryError<FetchError>) -> Self {
        FetchError::Exhausted {
            attempts: err.attempts,
            source: Box::new(err.source),
        }
    }
}
