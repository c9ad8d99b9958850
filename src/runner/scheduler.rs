//! Fixed-interval scheduler
//!
//! Drives the pipeline forever: sleep one full period, run, re-arm. The
//! first run happens one period after start, and a slow run delays the next
//! tick rather than letting missed ticks pile up.

use super::pipeline::Pipeline;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

/// Periodic trigger for the quality pipeline
pub struct Scheduler {
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the pipeline on every tick, until stopped
    pub async fn run(&self, pipeline: &Pipeline) {
        self.run_with(|| pipeline.run_once()).await;
    }

    /// Run an arbitrary job on every tick, until stopped
    pub async fn run_with<F, Fut>(&self, mut job: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.running.store(true, Ordering::SeqCst);

        let start = time::Instant::now();
        let mut ticker = time::interval_at(start + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval = ?self.interval, "scheduler started");

        while self.running.load(Ordering::SeqCst) {
            ticker.tick().await;
            job().await;
        }

        tracing::info!("scheduler stopped");
    }

    /// Request the loop to exit after the current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_scheduler(
        interval: Duration,
    ) -> (Arc<Scheduler>, Arc<AtomicUsize>, tokio::task::JoinHandle<()>) {
        let scheduler = Arc::new(Scheduler::new(interval));
        let count = Arc::new(AtomicUsize::new(0));

        let handle = {
            let scheduler = Arc::clone(&scheduler);
            let count = Arc::clone(&count);
            tokio::spawn(async move {
                scheduler
                    .run_with(|| {
                        let count = Arc::clone(&count);
                        async move {
                            count.fetch_add(1, Ordering::SeqCst);
                        }
                    })
                    .await;
            })
        };

        (scheduler, count, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_run_after_full_period() {
        let (scheduler, count, handle) = counting_scheduler(Duration::from_secs(300));

        time::sleep(Duration::from_secs(299)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        scheduler.stop();
        time::sleep(Duration::from_secs(300)).await;
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearms_every_period() {
        let (scheduler, count, handle) = counting_scheduler(Duration::from_secs(60));

        time::sleep(Duration::from_secs(181)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        scheduler.stop();
        time::sleep(Duration::from_secs(60)).await;
        handle.await.unwrap();
        assert!(!scheduler.is_running());
    }
}
