use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use gatehouse_core::{Mobile, SmsClient};

/// Discards every message. For local runs without a provider account.
#[derive(Debug, Clone, Default)]
pub struct MockSmsClient;

impl MockSmsClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl SmsClient for MockSmsClient {
    async fn send_sms(&self, _recipient: &Mobile, _body: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Captures outbound messages so tests can read delivered codes instead of
/// scraping them out of responses (they are never in responses).
#[derive(Debug, Clone, Default)]
pub struct RecordingSmsClient {
    messages: Arc<RwLock<Vec<(String, String)>>>,
}

impl RecordingSmsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.messages.read().await.clone()
    }

    pub async fn last_message(&self) -> Option<(String, String)> {
        self.messages.read().await.last().cloned()
    }
}

#[async_trait::async_trait]
impl SmsClient for RecordingSmsClient {
    async fn send_sms(&self, recipient: &Mobile, body: &str) -> Result<(), String> {
        self.messages.write().await.push((
            recipient.as_ref().expose_secret().clone(),
            body.to_string(),
        ));
        Ok(())
    }
}
