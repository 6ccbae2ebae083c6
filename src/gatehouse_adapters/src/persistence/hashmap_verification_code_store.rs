use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

use gatehouse_core::{UserId, VerificationCode, VerificationCodeStore, VerificationCodeStoreError};

/// In-memory one-time-code store with the same expiry and single-use
/// semantics as the Redis store. `consume` holds the write lock across
/// compare and remove, so a code can only be spent once.
pub struct HashMapVerificationCodeStore {
    codes: RwLock<HashMap<UserId, (VerificationCode, Instant)>>,
    code_ttl: Duration,
}

impl HashMapVerificationCodeStore {
    pub fn new(code_ttl: Duration) -> Self {
        Self {
            codes: RwLock::new(HashMap::new()),
            code_ttl,
        }
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for HashMapVerificationCodeStore {
    async fn store_code(
        &self,
        user_id: &UserId,
        code: VerificationCode,
    ) -> Result<(), VerificationCodeStoreError> {
        let expires_at = Instant::now() + self.code_ttl;
        self.codes
            .write()
            .await
            .insert(*user_id, (code, expires_at));
        Ok(())
    }

    async fn peek(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        let codes = self.codes.read().await;
        let Some((code, expires_at)) = codes.get(user_id) else {
            return Ok(None);
        };
        if *expires_at <= Instant::now() {
            return Ok(None);
        }
        Ok(Some(code.clone()))
    }

    async fn consume(
        &self,
        user_id: &UserId,
        candidate: &VerificationCode,
    ) -> Result<bool, VerificationCodeStoreError> {
        let mut codes = self.codes.write().await;

        let Some((code, expires_at)) = codes.get(user_id) else {
            return Ok(false);
        };

        if *expires_at <= Instant::now() {
            codes.remove(user_id);
            return Ok(false);
        }

        if code != candidate {
            return Ok(false);
        }

        codes.remove(user_id);
        Ok(true)
    }
}
