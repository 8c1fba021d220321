//! Store trait definitions and their PostgreSQL implementations.
//!
//! The domain services depend on these traits rather than on the pool so
//! tests can substitute in-memory stores. The user store and the app store
//! are deliberately separate: they are independently owned records and the
//! aggregation path fetches from both concurrently.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::auth::{App, AppId, AuthError, AuthResult, User, UserId, UserUpdate};

/// Store for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user, returning the store-assigned id
    ///
    /// Fails with `AuthError::UserExists` when `(phone, app_id)` is taken.
    async fn store_user(
        &self,
        phone: &str,
        name: &str,
        app_id: AppId,
        password_hash: &str,
    ) -> AuthResult<UserId>;

    /// Look up a user by `(phone, app_id)`
    async fn get_user_by_phone(&self, phone: &str, app_id: AppId) -> AuthResult<Option<User>>;

    /// Look up a user by id
    async fn get_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Overwrite the mutable profile fields, returning the updated record
    async fn update_user(&self, update: &UserUpdate) -> AuthResult<Option<User>>;

    /// Replace the password hash for `(phone, app_id)`, returning the updated record
    async fn update_password(
        &self,
        phone: &str,
        app_id: AppId,
        password_hash: &str,
    ) -> AuthResult<Option<User>>;

    /// Delete a user; true iff a row was actually removed
    async fn delete_user(&self, user_id: UserId) -> AuthResult<bool>;
}

/// Store for application (tenant) records
#[async_trait]
pub trait AppStore: Send + Sync {
    /// Look up an application by id
    async fn get_app_by_id(&self, app_id: AppId) -> AuthResult<Option<App>>;
}

const USER_COLUMNS: &str =
    "id, phone, name, password_hash, app_id, avatar_url, description, balance";

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        phone: row.get("phone"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        app_id: row.get("app_id"),
        avatar_url: row.get("avatar_url"),
        description: row.get("description"),
        balance: row.get("balance"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// PostgreSQL implementation of `UserStore`
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn store_user(
        &self,
        phone: &str,
        name: &str,
        app_id: AppId,
        password_hash: &str,
    ) -> AuthResult<UserId> {
        let result = sqlx::query(
            "INSERT INTO users (phone, name, app_id, password_hash, balance)
             VALUES ($1, $2, $3, $4, 0)
             RETURNING id",
        )
        .bind(phone)
        .bind(name)
        .bind(app_id)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.get("id")),
            Err(err) if is_unique_violation(&err) => Err(AuthError::UserExists),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_user_by_phone(&self, phone: &str, app_id: AppId) -> AuthResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone = $1 AND app_id = $2"
        ))
        .bind(phone)
        .bind(app_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn get_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn update_user(&self, update: &UserUpdate) -> AuthResult<Option<User>> {
        let row = sqlx::query(&format!(
            "UPDATE users
             SET name = $1, avatar_url = $2, description = $3
             WHERE id = $4
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&update.name)
        .bind(&update.avatar_url)
        .bind(&update.description)
        .bind(update.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn update_password(
        &self,
        phone: &str,
        app_id: AppId,
        password_hash: &str,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query(&format!(
            "UPDATE users
             SET password_hash = $1
             WHERE phone = $2 AND app_id = $3
             RETURNING {USER_COLUMNS}"
        ))
        .bind(password_hash)
        .bind(phone)
        .bind(app_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn delete_user(&self, user_id: UserId) -> AuthResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL implementation of `AppStore`
pub struct PgAppStore {
    pool: PgPool,
}

impl PgAppStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppStore for PgAppStore {
    async fn get_app_by_id(&self, app_id: AppId) -> AuthResult<Option<App>> {
        let row = sqlx::query("SELECT id, name, secret FROM apps WHERE id = $1")
            .bind(app_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| App {
            id: r.get("id"),
            name: r.get("name"),
            secret: r.get("secret"),
        }))
    }
}
