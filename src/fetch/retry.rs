//! Retry with fixed backoff
//!
//! Exhaustion is a typed outcome carrying the attempt count and the last
//! error, rather than a bare propagated failure.

use std::future::Future;
use std::time::Duration;

/// All attempts failed; carries the final error
#[derive(Debug, thiserror::Error)]
#[error("failed after {attempts} attempts: {source}")]
pub struct RetryError<E>
where
    E: std::error::Error + 'static,
{
    pub attempts: usize,
    #[source]
    pub source: E,
}

/// Run `op` up to `attempts` times, sleeping `delay` between failures
pub async fn retry_async<T, E, F, Fut>(
    attempts: usize,
    delay: Duration,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + 'static,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < attempts => {
                tracing::warn!(attempt, error = %error, "attempt failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                return Err(RetryError {
                    attempts: attempt,
                    source: error,
                })
            }
        }
    }
}
