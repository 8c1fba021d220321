//! Transport-agnostic service edge.
//!
//! Every operation validates request shape (presence and positivity only)
//! before invoking the domain core, and maps core failures to an opaque
//! caller-visible error. No store, hashing, or signing detail ever
//! crosses this boundary; on the authentication paths an unknown
//! principal and a wrong password are deliberately indistinguishable.

pub mod models;

pub use models::{
    ChangePasswordRequest, ForgetPasswordRequest, LoginRequest, RegisterRequest, TokenResponse,
    UpdateUserRequest, UserResponse,
};

use crate::auth::{AuthError, AuthManager, UserId, UserUpdate};
use crate::profile::ProfileManager;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Caller-visible errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required field is missing or non-positive
    #[error("{field} is required")]
    InvalidArgument { field: &'static str },

    /// Authentication failed; covers unknown principal and wrong password alike
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Duplicate registration
    #[error("user already exists")]
    Conflict,

    /// No such record (profile operations only)
    #[error("not found")]
    NotFound,

    /// Anything internal; intentionally detail-free
    #[error("internal error")]
    Internal,
}

/// Map a core failure on an authentication path
fn auth_error(err: AuthError) -> ApiError {
    match err {
        AuthError::UserExists => ApiError::Conflict,
        AuthError::UserNotFound | AuthError::InvalidCredentials => ApiError::InvalidCredentials,
        other => {
            log::error!("auth operation failed: {other}");
            ApiError::Internal
        }
    }
}

/// Map a core failure on a profile path
fn profile_error(err: AuthError) -> ApiError {
    match err {
        AuthError::UserNotFound => ApiError::NotFound,
        other => {
            log::error!("profile operation failed: {other}");
            ApiError::Internal
        }
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument { field });
    }
    Ok(())
}

fn require_positive(value: i64, field: &'static str) -> Result<(), ApiError> {
    if value <= 0 {
        return Err(ApiError::InvalidArgument { field });
    }
    Ok(())
}

/// Service facade combining authentication and profile access
#[derive(Clone)]
pub struct AuthApi {
    auth: AuthManager,
    profile: ProfileManager,
}

impl AuthApi {
    /// Create a new service facade
    pub fn new(auth: AuthManager, profile: ProfileManager) -> Self {
        Self { auth, profile }
    }

    /// Authenticate and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ApiError> {
        require_non_empty(&request.phone, "phone")?;
        require_non_empty(&request.password, "password")?;
        require_positive(i64::from(request.app_id), "app_id")?;

        let token = self
            .auth
            .login(&request.phone, &request.password, request.app_id)
            .await
            .map_err(auth_error)?;

        Ok(TokenResponse { token })
    }

    /// Register a new account and issue a session token
    pub async fn register(
        &self,
        cancel: &CancellationToken,
        request: RegisterRequest,
    ) -> Result<TokenResponse, ApiError> {
        require_non_empty(&request.name, "name")?;
        require_non_empty(&request.phone, "phone")?;
        require_non_empty(&request.password, "password")?;
        require_positive(i64::from(request.app_id), "app_id")?;

        let token = self
            .auth
            .register(
                cancel,
                &request.name,
                &request.phone,
                &request.password,
                request.app_id,
            )
            .await
            .map_err(auth_error)?;

        Ok(TokenResponse { token })
    }

    /// Rotate a password and issue a session token
    pub async fn change_password(
        &self,
        cancel: &CancellationToken,
        request: ChangePasswordRequest,
    ) -> Result<TokenResponse, ApiError> {
        require_non_empty(&request.phone, "phone")?;
        require_non_empty(&request.new_password, "new_password")?;
        require_positive(i64::from(request.app_id), "app_id")?;

        let token = self
            .auth
            .change_password(cancel, &request.phone, &request.new_password, request.app_id)
            .await
            .map_err(auth_error)?;

        Ok(TokenResponse { token })
    }

    /// Reset a forgotten password and issue a session token
    pub async fn forget_password(
        &self,
        cancel: &CancellationToken,
        request: ForgetPasswordRequest,
    ) -> Result<TokenResponse, ApiError> {
        require_non_empty(&request.phone, "phone")?;
        require_non_empty(&request.new_password, "new_password")?;
        require_positive(i64::from(request.app_id), "app_id")?;

        let token = self
            .auth
            .forget_password(cancel, &request.phone, &request.new_password, request.app_id)
            .await
            .map_err(auth_error)?;

        Ok(TokenResponse { token })
    }

    /// Fetch a user profile
    pub async fn get_user(&self, user_id: UserId) -> Result<UserResponse, ApiError> {
        require_positive(user_id, "user_id")?;

        let user = self
            .profile
            .get_user(user_id)
            .await
            .map_err(profile_error)?;

        Ok(user.into())
    }

    /// Update the mutable fields of a user profile
    pub async fn update_user(&self, request: UpdateUserRequest) -> Result<UserResponse, ApiError> {
        require_positive(request.id, "id")?;
        require_positive(i64::from(request.app_id), "app_id")?;
        require_non_empty(&request.name, "name")?;
        require_non_empty(&request.phone, "phone")?;

        let update = UserUpdate {
            id: request.id,
            name: request.name,
            avatar_url: request.avatar_url,
            description: request.description,
        };

        let user = self
            .profile
            .update_user(&update)
            .await
            .map_err(profile_error)?;

        Ok(user.into())
    }

    /// Delete a user; true iff a record was actually removed
    pub async fn delete_user(&self, user_id: UserId) -> Result<bool, ApiError> {
        require_positive(user_id, "user_id")?;

        self.profile
            .delete_user(user_id)
            .await
            .map_err(profile_error)
    }
}
