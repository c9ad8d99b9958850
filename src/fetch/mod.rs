//! Data fetching with retry
//!
//! The fetcher owns the process-lifetime connection pool and wraps each
//! run's query in a fixed-backoff retry.

pub mod fetcher;
pub mod retry;

pub use fetcher::{DataFetcher, FetchError, FETCH_ATTEMPTS, FETCH_RETRY_DELAY};
pub use retry::{retry_async, RetryError};
