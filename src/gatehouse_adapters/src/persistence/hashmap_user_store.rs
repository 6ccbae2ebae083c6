use std::collections::HashMap;

use tokio::sync::RwLock;

use gatehouse_core::{
    Email, Mobile, NewUser, Password, ProfileUpdate, User, UserId, UserStore, UserStoreError,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

/// In-memory user store for tests and local runs. Hashing goes through the
/// same Argon2id path as the PostgreSQL store so credential behavior matches.
#[derive(Default)]
pub struct HashMapUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.clone())
            .await
            .map_err(UserStoreError::Unexpected)?;

        let mut users = self.users.write().await;

        let taken = users.values().any(|user| {
            user.email() == &new_user.email || user.mobile() == &new_user.mobile
        });
        if taken {
            return Err(UserStoreError::DuplicateIdentity);
        }

        let user = User::new(
            UserId::new(),
            new_user.name,
            new_user.email,
            new_user.mobile,
            password_hash,
        );
        users.insert(*user.id(), user.clone());

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
            .find(|user| user.email() == email || user.mobile() == mobile)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let user = {
            let users = self.users.read().await;
            users
                .values()
                .find(|user| user.email() == email)
                .cloned()
                .ok_or(UserStoreError::UserNotFound)?
        };

        verify_password_hash(user.password_hash().clone(), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;

        if let Some(new_email) = &update.email {
            let collision = users
                .values()
                .any(|user| user.id() != id && user.email() == new_email);
            if collision {
                return Err(UserStoreError::DuplicateIdentity);
            }
        }

        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;

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
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::Unexpected)?;

        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;

        *user = User::new(
            *user.id(),
            user.name().clone(),
            user.email().clone(),
            user.mobile().clone(),
            password_hash,
        );

        Ok(())
    }
}
