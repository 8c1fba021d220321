//! Authentication configuration.
//!
//! Token lifetime and password hashing cost are deployment-tuned; the
//! defaults match the reference behavior (365-day tokens) and the Argon2
//! RFC 9106 low-memory parameters.

use chrono::Duration;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session token lifetime
    pub token_ttl: Duration,

    /// Server-side pepper appended to passwords before hashing (may be empty)
    pub pepper: String,

    /// Argon2 memory cost in KiB
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count
    pub argon2_iterations: u32,

    /// Argon2 lane count
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `TOKEN_TTL_DAYS`: Session token lifetime in days (default: 365)
    /// - `AUTH_PEPPER`: Server-side pepper (default: empty)
    /// - `ARGON2_MEMORY_KIB`: Memory cost in KiB (default: 65536)
    /// - `ARGON2_ITERATIONS`: Iteration count (default: 3)
    /// - `ARGON2_PARALLELISM`: Lane count (default: 4)
    pub fn from_env() -> Self {
        let token_ttl_days = std::env::var("TOKEN_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(365);

        let pepper = std::env::var("AUTH_PEPPER").unwrap_or_default();

        let argon2_memory_kib = std::env::var("ARGON2_MEMORY_KIB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(65536);

        let argon2_iterations = std::env::var("ARGON2_ITERATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let argon2_parallelism = std::env::var("ARGON2_PARALLELISM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        Self {
            token_ttl: Duration::days(token_ttl_days),
            pepper,
            argon2_memory_kib,
            argon2_iterations,
            argon2_parallelism,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::days(365),
            pepper: String::new(),
            argon2_memory_kib: 65536,
            argon2_iterations: 3,
            argon2_parallelism: 4,
        }
    }
}
