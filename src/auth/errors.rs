//! Authentication error types.

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    Hashing,

    /// Password verification failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No user for the given key
    #[error("User not found")]
    UserNotFound,

    /// No application for the given id
    #[error("Application not found")]
    AppNotFound,

    /// Duplicate (phone, app_id) on registration
    #[error("User already exists")]
    UserExists,

    /// Token signing key is missing or unusable
    #[error("Invalid signing key")]
    Signing,

    /// JWT primitive error
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Possession proof rejected for a password reset
    #[error("Password reset not verified")]
    ResetNotVerified,

    /// Unclassified internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database, hashing, and JWT errors are sanitized to prevent information
    /// disclosure about the internal system structure. A missing user and a
    /// wrong password produce the same message so callers cannot enumerate
    /// accounts.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::UserNotFound | AuthError::InvalidCredentials => {
                "invalid credentials".to_string()
            }
            AuthError::UserExists => "user already exists".to_string(),
            AuthError::Cancelled => "request cancelled".to_string(),
            _ => "internal server error".to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
