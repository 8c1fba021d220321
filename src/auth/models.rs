//! Authentication data models.

use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// Application ID type
pub type AppId = i32;

/// User model
///
/// A user belongs to exactly one application; `(phone, app_id)` is unique.
/// The password hash is the output of the adaptive hasher, never plaintext,
/// and is skipped when serializing outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub phone: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub app_id: AppId,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    pub balance: i64,
}

/// Application (tenant) model
///
/// Externally provisioned; this service only reads it. The secret is the
/// symmetric signing key for tokens issued to the application's users and
/// is never returned to any caller.
#[derive(Debug, Clone)]
pub struct App {
    pub id: AppId,
    pub name: String,
    pub secret: String,
}

/// JWT claims for a session token
///
/// Derived value, never persisted. Expiry is absolute, not sliding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub uid: UserId,
    pub phone: String,
    pub app_id: AppId,
    pub exp: i64,
}

/// Mutable profile fields for an update
///
/// Id, phone, and app_id are immutable after creation; an update writes
/// name, avatar_url, and description only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
}
