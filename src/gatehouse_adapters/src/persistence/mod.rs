pub mod hashmap_user_store;
pub mod hashmap_verification_code_store;
pub mod password_hash;
pub mod postgres_user_store;
pub mod redis_verification_code_store;
