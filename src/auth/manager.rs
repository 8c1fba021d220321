//! Authentication manager implementation.

use super::{
    aggregate::aggregate,
    config::AuthConfig,
    errors::{AuthError, AuthResult},
    password::PasswordHasher,
    token,
};
use crate::db::{AppStore, UserStore};
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Possession proof consulted before a forgotten-password overwrite
///
/// The reset flow must not rewrite a credential on the word of the caller
/// alone; implementations check something the account holder possesses
/// (a delivered one-time code, a verified channel). What that proof looks
/// like is a product decision, so the manager only depends on this seam.
#[async_trait]
pub trait ResetVerifier: Send + Sync {
    async fn verify_possession(&self, phone: &str, app_id: i32) -> AuthResult<()>;
}

/// Pass-through verifier preserving the legacy no-proof reset behavior
///
/// Every use is logged at warn level; deployments that keep it accept
/// that anyone who knows a phone number can rotate its password.
pub struct UnverifiedReset;

#[async_trait]
impl ResetVerifier for UnverifiedReset {
    async fn verify_possession(&self, _phone: &str, app_id: i32) -> AuthResult<()> {
        log::warn!("password reset for app {app_id} proceeding without possession proof");
        Ok(())
    }
}

/// Authentication manager
///
/// Composes the password hasher, the record aggregator, and the token
/// issuer around the two store collaborators. One instance serves all
/// applications; tokens are always signed with the secret of the user's
/// owning application.
#[derive(Clone)]
pub struct AuthManager {
    users: Arc<dyn UserStore>,
    apps: Arc<dyn AppStore>,
    hasher: PasswordHasher,
    token_ttl: Duration,
    reset_verifier: Arc<dyn ResetVerifier>,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// The password reset path defaults to [`UnverifiedReset`]; inject a
    /// real verifier with [`AuthManager::with_reset_verifier`].
    ///
    /// # Errors
    ///
    /// * `AuthError::Hashing` - Configured hashing cost is out of bounds
    pub fn new(
        users: Arc<dyn UserStore>,
        apps: Arc<dyn AppStore>,
        config: &AuthConfig,
    ) -> AuthResult<Self> {
        Ok(Self {
            users,
            apps,
            hasher: PasswordHasher::new(config)?,
            token_ttl: config.token_ttl,
            reset_verifier: Arc::new(UnverifiedReset),
        })
    }

    /// Replace the possession verifier used by `forget_password`
    pub fn with_reset_verifier(mut self, verifier: Arc<dyn ResetVerifier>) -> Self {
        self.reset_verifier = verifier;
        self
    }

    /// Authenticate a user and issue a session token
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user for `(phone, app_id)`
    /// * `AuthError::InvalidCredentials` - Password mismatch
    /// * `AuthError::AppNotFound` - Application record missing
    pub async fn login(&self, phone: &str, password: &str, app_id: i32) -> AuthResult<String> {
        let user = self
            .users
            .get_user_by_phone(phone, app_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(&user.password_hash, password)? {
            log::info!("login rejected for app {app_id}: credential mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let app = self
            .apps
            .get_app_by_id(app_id)
            .await?
            .ok_or(AuthError::AppNotFound)?;

        token::issue(&user, &app, self.token_ttl)
    }

    /// Register a new user and issue a session token
    ///
    /// The freshly created user and the application are re-fetched
    /// concurrently through the aggregator: the store is the source of
    /// truth for server-assigned fields and defaults.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserExists` - `(phone, app_id)` already registered
    /// * `AuthError::AppNotFound` - Application record missing
    /// * `AuthError::Cancelled` - Caller cancelled while aggregating
    pub async fn register(
        &self,
        cancel: &CancellationToken,
        name: &str,
        phone: &str,
        password: &str,
        app_id: i32,
    ) -> AuthResult<String> {
        let digest = self.hasher.hash(password)?;
        let user_id = self.users.store_user(phone, name, app_id, &digest).await?;

        let users = Arc::clone(&self.users);
        let fetch_user = async move {
            users
                .get_user_by_id(user_id)
                .await?
                .ok_or(AuthError::UserNotFound)
        };

        let apps = Arc::clone(&self.apps);
        let fetch_app = async move {
            apps.get_app_by_id(app_id)
                .await?
                .ok_or(AuthError::AppNotFound)
        };

        let (user, app) = aggregate(cancel, fetch_user, fetch_app).await?;

        token::issue(&user, &app, self.token_ttl)
    }

    /// Rotate a user's password and issue a session token
    ///
    /// Hash-and-persist and the application fetch run concurrently
    /// through the aggregator; the token is issued only when both the
    /// updated user and the application arrived.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user for `(phone, app_id)`
    /// * `AuthError::AppNotFound` - Application record missing
    /// * `AuthError::Cancelled` - Caller cancelled while aggregating
    pub async fn change_password(
        &self,
        cancel: &CancellationToken,
        phone: &str,
        new_password: &str,
        app_id: i32,
    ) -> AuthResult<String> {
        let users = Arc::clone(&self.users);
        let hasher = self.hasher.clone();
        let phone_for_update = phone.to_string();
        let password = new_password.to_string();
        let update_user = async move {
            let digest = hasher.hash(&password)?;
            users
                .update_password(&phone_for_update, app_id, &digest)
                .await?
                .ok_or(AuthError::UserNotFound)
        };

        let apps = Arc::clone(&self.apps);
        let fetch_app = async move {
            apps.get_app_by_id(app_id)
                .await?
                .ok_or(AuthError::AppNotFound)
        };

        let (user, app) = aggregate(cancel, update_user, fetch_app).await?;

        token::issue(&user, &app, self.token_ttl)
    }

    /// Reset a forgotten password after a possession proof
    ///
    /// Delegates to [`AuthManager::change_password`] once the configured
    /// [`ResetVerifier`] accepts the request.
    pub async fn forget_password(
        &self,
        cancel: &CancellationToken,
        phone: &str,
        new_password: &str,
        app_id: i32,
    ) -> AuthResult<String> {
        self.reset_verifier.verify_possession(phone, app_id).await?;
        self.change_password(cancel, phone, new_password, app_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::testing::fast_config;
    use crate::auth::models::App;
    use crate::auth::token::decode;
    use crate::db::repository::mock::{MockAppStore, MockUserStore};
    use chrono::Utc;

    const SECRET: &str = "app-seven-secret";

    fn manager_with(users: MockUserStore, apps: MockAppStore) -> AuthManager {
        AuthManager::new(Arc::new(users), Arc::new(apps), &fast_config())
            .expect("test hashing params should be valid")
    }

    fn manager() -> AuthManager {
        manager_with(
            MockUserStore::new(),
            MockAppStore::new().with_app(App {
                id: 7,
                name: "jobs-board".to_string(),
                secret: SECRET.to_string(),
            }),
        )
    }

    #[tokio::test]
    async fn register_then_login_issue_tokens_for_the_same_user() {
        let auth = manager();
        let cancel = CancellationToken::new();

        let registered = auth
            .register(&cancel, "Ann", "+1000", "p", 7)
            .await
            .unwrap();
        let logged_in = auth.login("+1000", "p", 7).await.unwrap();

        let first = decode(&registered, SECRET).unwrap();
        let second = decode(&logged_in, SECRET).unwrap();
        assert_eq!(first.uid, second.uid);
        assert_eq!(first.phone, "+1000");
        assert_eq!(first.app_id, 7);
    }

    #[tokio::test]
    async fn login_token_carries_the_configured_lifetime() {
        let auth = manager();
        let cancel = CancellationToken::new();
        auth.register(&cancel, "Ann", "+1000", "p", 7)
            .await
            .unwrap();

        let issued_at = Utc::now();
        let token = auth.login("+1000", "p", 7).await.unwrap();

        let claims = decode(&token, SECRET).unwrap();
        let expected_exp = (issued_at + Duration::days(365)).timestamp();
        assert!((claims.exp - expected_exp).abs() <= 2);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let auth = manager();
        let cancel = CancellationToken::new();
        auth.register(&cancel, "Ann", "+1000", "p", 7)
            .await
            .unwrap();

        let result = auth.login("+1000", "not-p", 7).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_phone_is_user_not_found() {
        let auth = manager();

        let result = auth.login("+9999", "p", 7).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let auth = manager();
        let cancel = CancellationToken::new();
        auth.register(&cancel, "Ann", "+1000", "p", 7)
            .await
            .unwrap();

        let result = auth.register(&cancel, "Imposter", "+1000", "q", 7).await;
        assert!(matches!(result, Err(AuthError::UserExists)));
    }

    #[tokio::test]
    async fn registration_against_unknown_app_fails() {
        let auth = manager();
        let cancel = CancellationToken::new();

        let result = auth.register(&cancel, "Ann", "+1000", "p", 99).await;
        assert!(matches!(result, Err(AuthError::AppNotFound)));
    }

    #[tokio::test]
    async fn change_password_swaps_which_password_logs_in() {
        let auth = manager();
        let cancel = CancellationToken::new();
        auth.register(&cancel, "Ann", "+1000", "old-pass", 7)
            .await
            .unwrap();

        let token = auth
            .change_password(&cancel, "+1000", "new-pass", 7)
            .await
            .unwrap();
        assert!(decode(&token, SECRET).is_ok());

        assert!(matches!(
            auth.login("+1000", "old-pass", 7).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(auth.login("+1000", "new-pass", 7).await.is_ok());
    }

    #[tokio::test]
    async fn change_password_for_unknown_phone_fails() {
        let auth = manager();
        let cancel = CancellationToken::new();

        let result = auth.change_password(&cancel, "+9999", "new-pass", 7).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn forget_password_defaults_to_the_pass_through_verifier() {
        let auth = manager();
        let cancel = CancellationToken::new();
        auth.register(&cancel, "Ann", "+1000", "old-pass", 7)
            .await
            .unwrap();

        let token = auth
            .forget_password(&cancel, "+1000", "new-pass", 7)
            .await
            .unwrap();
        assert!(decode(&token, SECRET).is_ok());
        assert!(auth.login("+1000", "new-pass", 7).await.is_ok());
    }

    #[tokio::test]
    async fn forget_password_is_blocked_by_a_rejecting_verifier() {
        struct DenyAll;

        #[async_trait]
        impl ResetVerifier for DenyAll {
            async fn verify_possession(&self, _phone: &str, _app_id: i32) -> AuthResult<()> {
                Err(AuthError::ResetNotVerified)
            }
        }

        let auth = manager().with_reset_verifier(Arc::new(DenyAll));
        let cancel = CancellationToken::new();
        auth.register(&cancel, "Ann", "+1000", "old-pass", 7)
            .await
            .unwrap();

        let result = auth.forget_password(&cancel, "+1000", "new-pass", 7).await;
        assert!(matches!(result, Err(AuthError::ResetNotVerified)));

        // The stored credential is untouched.
        assert!(auth.login("+1000", "old-pass", 7).await.is_ok());
    }

    #[tokio::test]
    async fn cancelled_registration_reports_cancelled() {
        let auth = manager();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = auth.register(&cancel, "Ann", "+1000", "p", 7).await;
        assert!(matches!(result, Err(AuthError::Cancelled)));
    }
}
