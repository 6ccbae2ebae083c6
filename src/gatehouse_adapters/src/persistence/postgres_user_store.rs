use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres, Row, postgres::PgRow};
use uuid::Uuid;

use gatehouse_core::{
    Email, Mobile, NewUser, Password, ProfileUpdate, User, UserId, UserName, UserStore,
    UserStoreError,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.clone())
            .await
            .map_err(UserStoreError::Unexpected)?;

        let id = UserId::new();

        let query = sqlx::query(
            r#"
                INSERT INTO users (id, name, email, mobile, password_hash)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.as_uuid())
        .bind(new_user.name.as_str())
        .bind(new_user.email.as_ref().expose_secret().as_str())
        .bind(new_user.mobile.as_ref().expose_secret().as_str())
        .bind(password_hash.expose_secret().as_str());

        query.execute(&self.pool).await.map_err(|e| {
            if is_unique_violation(&e) {
                return UserStoreError::DuplicateIdentity;
            }
            UserStoreError::Unexpected(e.to_string())
        })?;

        Ok(User::new(
            id,
            new_user.name,
            new_user.email,
            new_user.mobile,
            password_hash,
        ))
    }

    #[tracing::instrument(name = "Looking up user by email or mobile in PostgreSQL", skip_all)]
    async fn find_by_email_or_mobile(
        &self,
        email: &Email,
        mobile: &Mobile,
    ) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, mobile, password_hash
                FROM users
                WHERE email = $1 OR mobile = $2
            "#,
        )
        .bind(email.as_ref().expose_secret().as_str())
        .bind(mobile.as_ref().expose_secret().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        row.map(user_from_row).transpose()
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, mobile, password_hash
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        user_from_row(row)
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, mobile, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        let user = user_from_row(row)?;

        verify_password_hash(user.password_hash().clone(), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<(), UserStoreError> {
        let name = update.name.as_ref().map(|n| n.as_str().to_string());
        let email = update
            .email
            .as_ref()
            .map(|e| e.as_ref().expose_secret().clone());

        let result = sqlx::query(
            r#"
                UPDATE users
                SET name = COALESCE($2, name),
                    email = COALESCE($3, email),
                    updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(name)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return UserStoreError::DuplicateIdentity;
            }
            UserStoreError::Unexpected(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::Unexpected)?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2,
                    updated_at = now()
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(password_hash.expose_secret().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn user_from_row(row: PgRow) -> Result<User, UserStoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let mobile: String = row
        .try_get("mobile")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

    let name = UserName::parse(name).map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let email = Email::try_from(Secret::from(email))
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let mobile = Mobile::try_from(Secret::from(mobile))
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

    Ok(User::new(
        UserId::from(id),
        name,
        email,
        mobile,
        Secret::from(password_hash),
    ))
}
