use async_trait::async_trait;

use crate::domain::mobile::Mobile;

/// Outbound delivery channel for one-time codes. Failures are surfaced to the
/// caller as-is; there is no retry at this layer.
#[async_trait]
pub trait SmsClient: Send + Sync {
    async fn send_sms(&self, recipient: &Mobile, body: &str) -> Result<(), String>;
}

#[async_trait]
impl<T: SmsClient + ?Sized> SmsClient for std::sync::Arc<T> {
    async fn send_sms(&self, recipient: &Mobile, body: &str) -> Result<(), String> {
        (**self).send_sms(recipient, body).await
    }
}
