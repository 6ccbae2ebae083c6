use std::time::Duration;

use secrecy::Secret;
use serde_json::{Value, json};

use gatehouse_adapters::{
    HashMapUserStore, HashMapVerificationCodeStore, JwtTokenService, RecordingSmsClient,
    RefreshCookieSettings, http::state::AppState,
};
use gatehouse_service::{AuthService, RateLimits};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub sms: RecordingSmsClient,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // High enough that only the dedicated rate-limit tests hit a window.
        Self::spawn_with_limits(RateLimits {
            window: Duration::from_secs(15 * 60),
            max_auth_attempts: 100,
            max_refresh_attempts: 100,
            max_password_change_attempts: 100,
        })
        .await
    }

    pub async fn spawn_with_limits(limits: RateLimits) -> Self {
        let sms = RecordingSmsClient::new();

        let tokens = JwtTokenService::new(
            &Secret::from("test-access-secret".to_string()),
            15 * 60,
            &Secret::from("test-refresh-secret".to_string()),
            7 * 24 * 60 * 60,
        );
        let cookie_settings = RefreshCookieSettings {
            secure: false,
            max_age_seconds: 7 * 24 * 60 * 60,
        };

        let state = AppState::new(
            HashMapUserStore::new(),
            HashMapVerificationCodeStore::new(Duration::from_secs(5 * 60)),
            sms.clone(),
            tokens,
            cookie_settings,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = AuthService::new(state, limits);
        tokio::spawn(service.run(listener));

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build test client");

        Self {
            address,
            client,
            sms,
        }
    }

    pub async fn post_register(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/auth/register", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/auth/login", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_verify_2fa(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/auth/verify-2fa", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_refresh_token(&self) -> reqwest::Response {
        self.client
            .post(format!("{}/api/auth/refresh-token", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_profile(&self, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .patch(format!("{}/api/users/profile", self.address))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_request_password_change(&self, token: &str) -> reqwest::Response {
        self.client
            .post(format!(
                "{}/api/users/request-password-change",
                self.address
            ))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_change_password(&self, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .patch(format!("{}/api/users/change-password", self.address))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// The 6-digit code from the most recent SMS, as a real client would
    /// read it off their phone.
    pub async fn last_sms_code(&self) -> String {
        let (_, body) = self.sms.last_message().await.expect("no SMS delivered");
        body.rsplit(' ')
            .next()
            .expect("empty SMS body")
            .to_string()
    }

    /// Full happy path up to an established session. Returns the user id and
    /// access token; the refresh cookie ends up in the client's cookie store.
    pub async fn register_and_authenticate(&self, email: &str, mobile: &str) -> (String, String) {
        let response = self
            .post_register(&json!({
                "name": "Test User",
                "email": email,
                "mobile": mobile,
                "password": "ValidPass1",
            }))
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let response = self
            .post_login(&json!({ "email": email, "password": "ValidPass1" }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        let user_id = body["userId"].as_str().unwrap().to_string();

        let code = self.last_sms_code().await;
        let response = self
            .post_verify_2fa(&json!({ "userId": user_id, "code": code }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        let access_token = body["accessToken"].as_str().unwrap().to_string();

        (user_id, access_token)
    }
}

pub fn register_body(name: &str, email: &str, mobile: &str, password: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "mobile": mobile,
        "password": password,
    })
}
