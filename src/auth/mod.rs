//! Authentication module: credential verification, registration, password
//! rotation, and session token issuance.
//!
//! This module implements the authentication core with:
//! - Argon2id password hashing with configurable cost and optional pepper
//! - Per-application HS256 session tokens (365-day expiry by default)
//! - Concurrent user/application record aggregation with structured
//!   cancellation
//! - A possession-proof seam gating the forgotten-password path
//!
//! ## Example
//!
//! ```no_run
//! use auth_service::auth::{AuthConfig, AuthManager};
//! use auth_service::db::{Database, DatabaseConfig, PgAppStore, PgUserStore};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let users = Arc::new(PgUserStore::new(db.pool().clone()));
//!     let apps = Arc::new(PgAppStore::new(db.pool().clone()));
//!     let auth = AuthManager::new(users, apps, &AuthConfig::from_env())?;
//!
//!     let cancel = CancellationToken::new();
//!     let token = auth
//!         .register(&cancel, "Ann", "+15550100", "hunter2", 7)
//!         .await?;
//!     println!("registered: {token}");
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod errors;
pub mod manager;
pub mod models;
pub mod password;
pub mod token;

pub use aggregate::aggregate;
pub use config::AuthConfig;
pub use errors::{AuthError, AuthResult};
pub use manager::{AuthManager, ResetVerifier, UnverifiedReset};
pub use models::{App, AppId, TokenClaims, User, UserId, UserUpdate};
pub use password::PasswordHasher;
