//! Vigil
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - DATABASE_URI: Database connection URI (required)
//! - SMTP_SERVER: SMTP relay hostname (required)
//! - SMTP_PORT: SMTP relay port (default: 587)
//! - EMAIL_USER: SMTP login and From address (required)
//! - EMAIL_PASSWORD: SMTP password (required)
//! - EMAIL_RECEIVER: Notification recipient (required)
//! - CHECK_TABLE: Table to check (default: records)
//! - CHECK_INTERVAL_SECS: Seconds between runs (default: 300)
//! - RUST_LOG: Log level (default: info)

use vigil::audit::Journal;
use vigil::config::Config;
use vigil::fetch::DataFetcher;
use vigil::notify::EmailNotifier;
use vigil::runner::{Pipeline, Scheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vigil=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing settings abort startup before the loop is entered
    let config = Config::from_env()?;

    let fetcher = DataFetcher::new(&config.database_uri, &config.check_table)?;
    let notifier = EmailNotifier::new(config.smtp.clone())?;
    let journal = Journal::default();

    tracing::info!("Vigil configuration:");
    tracing::info!("  Query: {}", fetcher.query());
    tracing::info!("  Check interval: {:?}", config.check_interval);
    tracing::info!("  Journal: {}", journal.path().display());
    tracing::info!(
        "  SMTP relay: {}:{} (STARTTLS)",
        config.smtp.server,
        config.smtp.port
    );
    tracing::info!(
        "  Notifications: {} -> {}",
        config.smtp.user,
        config.smtp.receiver
    );

    println!(
        r#"
        _         _  _
 __   _(_)  __ _ (_)| |
 \ \ / / | / _` || || |
  \ V /| || (_| || || |
   \_/ |_| \__, ||_||_|
           |___/

 Scheduled Data-Quality Checks
 Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );

    let pipeline = Pipeline::new(fetcher, journal, notifier);
    let scheduler = Scheduler::new(config.check_interval);

    // Runs until the process is killed
    scheduler.run(&pipeline).await;

    Ok(())
}
