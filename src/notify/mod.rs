//! Notification delivery for rendered reports.

use async_trait::async_trait;
use thiserror::Error;

pub mod mock;
pub mod telegram;

pub use mock::RecordingSink;
pub use telegram::TelegramSink;

/// Outbound sink for the message form of a report.
///
/// Delivery is best-effort: the poller logs a failure and moves on, and a
/// failed delivery never delays or aborts the next cycle.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver the text to every configured recipient, isolating failures
    /// per recipient. Errors only when no recipient could be reached.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram api error: {0}")]
    Api(String),
    #[error("delivery failed for all {0} recipients")]
    AllRecipientsFailed(usize),
}
