//! # Auth Service
//!
//! A multi-tenant authentication service core: it verifies credentials,
//! registers accounts, rotates passwords, and issues session tokens signed
//! per calling application.
//!
//! The crate sits between a network transport and relational storage. The
//! transport validates request shape through the [`api`] facade; the facade
//! composes the password hasher, the concurrent record aggregator, and the
//! token issuer around the store collaborators and returns a token or a
//! profile, or fails with a classified error.
//!
//! ## Architecture
//!
//! - Users belong to exactly one application (tenant); `(phone, app_id)`
//!   is unique.
//! - Tokens are HS256 JWTs signed with the owning application's secret,
//!   carrying `{uid, phone, app_id, exp}` with an absolute expiry.
//! - Registration and password rotation assemble their response from two
//!   independently-owned records, fetched concurrently and joined by a
//!   supervisory loop that cancels and joins the sibling task on the first
//!   error or on caller cancellation.
//! - Store access is trait-based ([`db::UserStore`], [`db::AppStore`]) with
//!   PostgreSQL implementations.
//!
//! ## Core Modules
//!
//! - [`auth`]: hashing, token issuance, record aggregation, and the
//!   login/register/password-rotation flows
//! - [`profile`]: pass-through profile read/update/delete
//! - [`api`]: transport-agnostic edge with request validation and opaque
//!   error mapping
//! - [`db`]: connection pooling and the store implementations

/// Transport-agnostic service edge.
pub mod api;

/// Authentication flows, hashing, tokens, and aggregation.
pub mod auth;

/// Database pool and store implementations.
pub mod db;

/// Profile access.
pub mod profile;

pub use api::{ApiError, AuthApi};
pub use auth::{AuthConfig, AuthError, AuthManager, AuthResult};
pub use db::{Database, DatabaseConfig};
pub use profile::ProfileManager;
