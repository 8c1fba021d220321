//! Edge request and response types.

use crate::auth::{AppId, User, UserId};
use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
    pub app_id: AppId,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub app_id: AppId,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub phone: String,
    pub new_password: String,
    pub app_id: AppId,
}

/// Forgotten-password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgetPasswordRequest {
    pub phone: String,
    pub new_password: String,
    pub app_id: AppId,
}

/// Profile update request
///
/// Phone and app_id are part of the request shape but immutable; only
/// name, avatar_url, and description are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    pub app_id: AppId,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
}

/// Issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Caller-visible user view
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub phone: String,
    pub name: String,
    pub app_id: AppId,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    pub balance: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            name: user.name,
            app_id: user.app_id,
            avatar_url: user.avatar_url,
            description: user.description,
            balance: user.balance,
        }
    }
}
