//! Adaptive password hashing and verification.

use super::{
    config::AuthConfig,
    errors::{AuthError, AuthResult},
};
use argon2::{
    password_hash::{
        Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
        rand_core::OsRng,
    },
    Algorithm, Argon2, Params, Version,
};

/// Salted, adaptive-cost password hasher
///
/// Hashing is Argon2id with a random per-call salt, so two digests of the
/// same password differ while both verify. Cost parameters come from
/// [`AuthConfig`] and an optional server-side pepper is appended before
/// hashing.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: String,
}

impl PasswordHasher {
    /// Create a hasher from the configured cost parameters
    ///
    /// # Errors
    ///
    /// * `AuthError::Hashing` - Cost parameters outside Argon2 bounds
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|_| AuthError::Hashing)?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper: config.pepper.clone(),
        })
    }

    /// Hash a password into a PHC-format digest
    ///
    /// # Errors
    ///
    /// * `AuthError::Hashing` - RNG or hashing primitive failure
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::Hashing)?
            .to_string())
    }

    /// Verify a password against a stored digest
    ///
    /// A mismatch is `Ok(false)`, not an error; the comparison inside the
    /// hashing primitive is constant-time. Only a malformed digest or an
    /// internal primitive failure produces `AuthError::Hashing`.
    pub fn verify(&self, digest: &str, password: &str) -> AuthResult<bool> {
        let peppered = format!("{}{}", password, self.pepper);
        let parsed = PasswordHash::new(digest).map_err(|_| AuthError::Hashing)?;

        match self.argon2.verify_password(peppered.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(_) => Err(AuthError::Hashing),
        }
    }
}
