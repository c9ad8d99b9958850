//! One scheduled run: fetch, validate, report
//!
//! Every failure is contained here. A fetch error ends the run; journal and
//! notification errors are logged independently so one failing sink never
//! starves the other. Nothing escapes to the scheduler loop.

use crate::audit::Journal;
use crate::checks::{validate, Issue};
use crate::fetch::DataFetcher;
use crate::notify::EmailNotifier;

/// The fetch -> validate -> journal -> notify pipeline
pub struct Pipeline {
    fetcher: DataFetcher,
    journal: Journal,
    notifier: EmailNotifier,
}

impl Pipeline {
    pub fn new(fetcher: DataFetcher, journal: Journal, notifier: EmailNotifier) -> Self {
        Self {
            fetcher,
            journal,
            notifier,
        }
    }

    /// Execute one full run. Never panics, never returns an error.
    pub async fn run_once(&self) {
        let snapshot = match self.fetcher.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::error!(error = %error, "data fetch failed, skipping run");
                return;
            }
        };

        let issues = validate(&snapshot);
        if issues.is_empty() {
            tracing::info!(rows = snapshot.row_count(), "data quality checks passed");
            return;
        }

        tracing::warn!(count = issues.len(), "data quality issues detected");
        self.report(&issues).await;
    }

    /// Journal and notify, each exactly once, each failure swallowed
    pub async fn report(&self, issues: &[Issue]) {
        if let Err(error) = self.journal.append(issues) {
            tracing::error!(
                error = %error,
                path = %self.journal.path().display(),
                "failed to journal issues"
            );
        }

        if let Err(error) = self.notifier.notify(issues).await {
            tracing::error!(error = %error, "failed to send email notification");
        }
    }
}
