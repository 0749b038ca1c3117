//! Recording sink for tests.

use super::{NotificationSink, NotifyError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Sink that records every delivered text, optionally failing instead.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every delivery fail.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Texts delivered so far.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("sink lock poisoned").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::AllRecipientsFailed(1));
        }
        self.sent
            .lock()
            .expect("sink lock poisoned")
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_sink_captures_sends() {
        let sink = RecordingSink::new();
        sink.send("first").await.unwrap();
        sink.send("second").await.unwrap();
        assert_eq!(sink.sent(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_failing_sink_errors() {
        let sink = RecordingSink::failing();
        assert!(sink.send("report").await.is_err());
        assert!(sink.sent().is_empty());
    }
}
