use std::sync::Arc;

use redis::{Commands, Connection, Script};
use tokio::sync::Mutex;

use gatehouse_core::{UserId, VerificationCode, VerificationCodeStore, VerificationCodeStoreError};

/// Redis-backed one-time-code store. Expiry is delegated to the key TTL and
/// single-use consumption to a compare-and-delete script, so two concurrent
/// verifications of the same code cannot both succeed.
#[derive(Clone)]
pub struct RedisVerificationCodeStore {
    conn: Arc<Mutex<Connection>>,
    code_ttl: u64,
}

impl RedisVerificationCodeStore {
    pub fn new(conn: Arc<Mutex<Connection>>, code_ttl: u64) -> Self {
        Self { conn, code_ttl }
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for RedisVerificationCodeStore {
    async fn store_code(
        &self,
        user_id: &UserId,
        code: VerificationCode,
    ) -> Result<(), VerificationCodeStoreError> {
        let key = get_key(user_id);

        let mut conn = self.conn.lock().await;
        conn.set_ex(key, code.as_str(), self.code_ttl)
            .map_err(|e| VerificationCodeStoreError::Unexpected(e.to_string()))
    }

    async fn peek(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        let key = get_key(user_id);

        let mut conn = self.conn.lock().await;
        let stored: Option<String> = conn
            .get(&key)
            .map_err(|e| VerificationCodeStoreError::Unexpected(e.to_string()))?;

        stored
            .map(|code| {
                VerificationCode::parse(code)
                    .map_err(|e| VerificationCodeStoreError::Unexpected(e.to_string()))
            })
            .transpose()
    }

    async fn consume(
        &self,
        user_id: &UserId,
        candidate: &VerificationCode,
    ) -> Result<bool, VerificationCodeStoreError> {
        let key = get_key(user_id);

        // GET/compare/DEL must be one round trip; the script runs atomically
        // on the server. A mismatch leaves the stored code in place.
        let script = Script::new(
            r#"
                if redis.call('GET', KEYS[1]) == ARGV[1] then
                    redis.call('DEL', KEYS[1])
                    return 1
                else
                    return 0
                end
            "#,
        );

        let mut conn = self.conn.lock().await;
        let consumed: i64 = script
            .key(&key)
            .arg(candidate.as_str())
            .invoke(&mut *conn)
            .map_err(|e| VerificationCodeStoreError::Unexpected(e.to_string()))?;

        Ok(consumed == 1)
    }
}

const VERIFICATION_CODE_KEY_PREFIX: &str = "2fa:";

fn get_key(user_id: &UserId) -> String {
    format!("{}{}", VERIFICATION_CODE_KEY_PREFIX, user_id)
}
