use std::sync::Arc;

use gatehouse_core::{SmsClient, UserStore, VerificationCodeStore};

use crate::auth::{session_cookie::RefreshCookieSettings, token_service::JwtTokenService};

/// Shared handler state. Adapters sit behind `Arc` so the state clones
/// cheaply into every route.
pub struct AppState<U, V, S> {
    pub user_store: Arc<U>,
    pub code_store: Arc<V>,
    pub sms_client: Arc<S>,
    pub tokens: Arc<JwtTokenService>,
    pub cookie_settings: RefreshCookieSettings,
}

impl<U, V, S> AppState<U, V, S>
where
    U: UserStore,
    V: VerificationCodeStore,
    S: SmsClient,
{
    pub fn new(
        user_store: U,
        code_store: V,
        sms_client: S,
        tokens: JwtTokenService,
        cookie_settings: RefreshCookieSettings,
    ) -> Self {
        Self {
            user_store: Arc::new(user_store),
            code_store: Arc::new(code_store),
            sms_client: Arc::new(sms_client),
            tokens: Arc::new(tokens),
            cookie_settings,
        }
    }
}

impl<U, V, S> Clone for AppState<U, V, S> {
    fn clone(&self) -> Self {
        Self {
            user_store: Arc::clone(&self.user_store),
            code_store: Arc::clone(&self.code_store),
            sms_client: Arc::clone(&self.sms_client),
            tokens: Arc::clone(&self.tokens),
            cookie_settings: self.cookie_settings,
        }
    }
}
