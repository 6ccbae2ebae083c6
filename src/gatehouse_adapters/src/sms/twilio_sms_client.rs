use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use gatehouse_core::{Mobile, SmsClient};

pub struct TwilioSmsClient {
    http_client: Client,
    base_url: String,
    account_sid: String,
    auth_token: Secret<String>,
    from_number: String,
}

impl TwilioSmsClient {
    pub fn new(
        base_url: String,
        account_sid: String,
        auth_token: Secret<String>,
        from_number: String,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            account_sid,
            auth_token,
            from_number,
        }
    }
}

#[async_trait::async_trait]
impl SmsClient for TwilioSmsClient {
    #[tracing::instrument(name = "Sending SMS", skip_all)]
    async fn send_sms(&self, recipient: &Mobile, body: &str) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base
            .join(&format!(
                "/2010-04-01/Accounts/{}/Messages.json",
                self.account_sid
            ))
            .map_err(|e| e.to_string())?;

        let params = [
            ("To", recipient.as_ref().expose_secret().as_str()),
            ("From", self.from_number.as_str()),
            ("Body", body),
        ];

        let request = self
            .http_client
            .post(url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&params);

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
