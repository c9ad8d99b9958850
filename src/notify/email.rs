//! Email notification over SMTP
//!
//! One message per run carrying every issue found in that run. Failures are
//! returned to the caller, which logs and swallows them; a dead relay must
//! never take the scheduler loop down with it.

use crate::checks::Issue;
use crate::config::SmtpConfig;
use lettre::message::header::ContentType;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Subject line for issue notifications
pub const NOTIFICATION_SUBJECT: &str = "Data Quality Issues Detected";

/// Sends issue reports through an SMTP relay with STARTTLS
pub struct EmailNotifier {
    config: SmtpConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailNotifier {
    /// Build a pooled STARTTLS transport for the configured relay
    pub fn new(config: SmtpConfig) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(config.user.clone(), config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self { config, mailer })
    }

    /// Send one message containing all of a run's issues
    pub async fn notify(&self, issues: &[Issue]) -> Result<(), NotifyError> {
        let body = render_body(issues)?;
        let message = Message::builder()
            .from(self.config.user.parse()?)
            .to(self.config.receiver.parse()?)
            .subject(NOTIFICATION_SUBJECT)
            .multipart(
                MultiPart::mixed().singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body),
                ),
            )?;

        self.mailer.send(message).await?;
        tracing::info!(receiver = %self.config.receiver, "email notification sent");
        Ok(())
    }
}

/// Human-readable issue dump used as the message body
pub fn render_body(issues: &[Issue]) -> Result<String, NotifyError> {
    Ok(format!(
        "Data quality issues were detected:\n\n{}",
        serde_json::to_string_pretty(issues)?
    ))
}

/// Notification failures; reported by the runner, never fatal
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("failed to render issue report: {0}")]
    Render(#[from] serde_json::Error),
}
