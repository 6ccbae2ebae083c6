//! Shared in-memory fakes for use-case tests. Passwords are compared in
//! plaintext here; hashing belongs to the persistence adapters.

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use gatehouse_core::{
    Email, Mobile, NewUser, Password, ProfileUpdate, SmsClient, User, UserId, UserStore,
    UserStoreError, VerificationCode, VerificationCodeStore, VerificationCodeStoreError,
};

#[derive(Clone, Default)]
pub struct FakeUserStore {
    users: Arc<RwLock<HashMap<UserId, (User, String)>>>,
}

impl FakeUserStore {
    pub async fn insert(&self, new_user: NewUser) -> User {
        self.add_user(new_user).await.unwrap()
    }

    pub async fn stored_password(&self, id: &UserId) -> Option<String> {
        self.users
            .read()
            .await
            .get(id)
            .map(|(_, password)| password.clone())
    }
}

#[async_trait::async_trait]
impl UserStore for FakeUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let duplicate = users.values().any(|(user, _)| {
            user.email() == &new_user.email || user.mobile() == &new_user.mobile
        });
        if duplicate {
            return Err(UserStoreError::DuplicateIdentity);
        }

        let plaintext = new_user.password.as_ref().expose_secret().clone();
        let user = User::new(
            UserId::new(),
            new_user.name,
            new_user.email,
            new_user.mobile,
            Secret::from(format!("fake-hash:{plaintext}")),
        );
        users.insert(*user.id(), (user.clone(), plaintext));
        Ok(user)
    }

    async fn find_by_email_or_mobile(
        &self,
        email: &Email,
        mobile: &Mobile,
    ) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|(user, _)| user.email() == email || user.mobile() == mobile)
            .map(|(user, _)| user.clone()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(id)
            .map(|(user, _)| user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let (user, stored) = users
            .values()
            .find(|(user, _)| user.email() == email)
            .ok_or(UserStoreError::UserNotFound)?;
        if stored != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(user.clone())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &update.email {
            let taken = users
                .iter()
                .any(|(other_id, (user, _))| other_id != id && user.email() == email);
            if taken {
                return Err(UserStoreError::DuplicateIdentity);
            }
        }
        let (user, _) = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        let name = update.name.unwrap_or_else(|| user.name().clone());
        let email = update.email.unwrap_or_else(|| user.email().clone());
        *user = User::new(
            *user.id(),
            name,
            email,
            user.mobile().clone(),
            user.password_hash().clone(),
        );
        Ok(())
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (_, password) = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        *password = new_password.as_ref().expose_secret().clone();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeCodeStore {
    codes: Arc<RwLock<HashMap<UserId, VerificationCode>>>,
}

#[async_trait::async_trait]
impl VerificationCodeStore for FakeCodeStore {
    async fn store_code(
        &self,
        user_id: &UserId,
        code: VerificationCode,
    ) -> Result<(), VerificationCodeStoreError> {
        self.codes.write().await.insert(*user_id, code);
        Ok(())
    }

    async fn peek(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        Ok(self.codes.read().await.get(user_id).cloned())
    }

    async fn consume(
        &self,
        user_id: &UserId,
        candidate: &VerificationCode,
    ) -> Result<bool, VerificationCodeStoreError> {
        let mut codes = self.codes.write().await;
        match codes.get(user_id) {
            Some(stored) if stored == candidate => {
                codes.remove(user_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Records every message instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingSmsClient {
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl RecordingSmsClient {
    pub async fn last_message(&self) -> Option<String> {
        self.sent.read().await.last().map(|(_, body)| body.clone())
    }
}

#[async_trait::async_trait]
impl SmsClient for RecordingSmsClient {
    async fn send_sms(&self, recipient: &Mobile, body: &str) -> Result<(), String> {
        self.sent.write().await.push((
            recipient.as_ref().expose_secret().clone(),
            body.to_string(),
        ));
        Ok(())
    }
}

/// Always fails, for exercising the delivery-failure path.
#[derive(Clone, Default)]
pub struct FailingSmsClient;

#[async_trait::async_trait]
impl SmsClient for FailingSmsClient {
    async fn send_sms(&self, _recipient: &Mobile, _body: &str) -> Result<(), String> {
        Err("delivery failed".to_string())
    }
}

pub fn new_user(name: &str, email: &str, mobile: &str, password: &str) -> NewUser {
    NewUser {
        name: gatehouse_core::UserName::parse(name.to_string()).unwrap(),
        email: Email::parse(Secret::from(email.to_string())).unwrap(),
        mobile: Mobile::parse(Secret::from(mobile.to_string())).unwrap(),
        password: Password::parse_new(Secret::from(password.to_string())).unwrap(),
    }
}

pub fn email(value: &str) -> Email {
    Email::parse(Secret::from(value.to_string())).unwrap()
}

pub fn password(value: &str) -> Password {
    Password::parse(Secret::from(value.to_string())).unwrap()
}
