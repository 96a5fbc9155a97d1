// TestDependencies - recording implementations for testing
//
// Provides delivery-channel doubles that capture every send so tests can
// assert on dispatch behavior, and can be flipped into a failing mode to
// exercise failure isolation.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::traits::{BaseMessageService, BasePushNotificationService};

// =============================================================================
// Recording Message Service
// =============================================================================

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub address: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<SentMessage>>,
    failing: AtomicBool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Check if any message went to an address.
    pub fn was_messaged(&self, address: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|m| m.address == address)
    }

    /// When failing, every send returns an error (and records nothing).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseMessageService for RecordingMessenger {
    async fn send_message(&self, address: &str, text: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("message channel down");
        }
        self.sent.lock().unwrap().push(SentMessage {
            address: address.to_string(),
            body: text.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Recording Push Service
// =============================================================================

#[derive(Debug, Clone)]
pub struct SentPush {
    pub token: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

#[derive(Default)]
pub struct RecordingPushService {
    sent: Mutex<Vec<SentPush>>,
    failing: AtomicBool,
}

impl RecordingPushService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }

    pub fn was_pushed(&self, token: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|p| p.token == token)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BasePushNotificationService for RecordingPushService {
    async fn send_push(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("push channel down");
        }
        self.sent.lock().unwrap().push(SentPush {
            token: push_token.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data,
        });
        Ok(())
    }
}
