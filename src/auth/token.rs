//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the owning application's secret.
//! Claims carry the user id, phone, application id, and an absolute
//! expiry; nothing is persisted.

use super::{
    errors::{AuthError, AuthResult},
    models::{App, TokenClaims, User},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

/// Issue a signed session token for a user of an application
///
/// Pure function of its inputs plus wall-clock time; the expiry is
/// `now + ttl`, absolute rather than sliding.
///
/// # Errors
///
/// * `AuthError::Signing` - The application secret is empty
/// * `AuthError::Jwt` - The signing primitive failed
pub fn issue(user: &User, app: &App, ttl: Duration) -> AuthResult<String> {
    if app.secret.is_empty() {
        return Err(AuthError::Signing);
    }

    let claims = TokenClaims {
        uid: user.id,
        phone: user.phone.clone(),
        app_id: app.id,
        exp: (Utc::now() + ttl).timestamp(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Decode and verify a session token against an application secret
///
/// Rejects tokens whose signature does not match the secret and tokens
/// past their expiry.
pub fn decode(token: &str, secret: &str) -> AuthResult<TokenClaims> {
    let data = jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            phone: "+15550100".to_string(),
            name: "Ann".to_string(),
            password_hash: "$argon2id$opaque".to_string(),
            app_id: 7,
            avatar_url: None,
            description: None,
            balance: 0,
        }
    }

    fn app() -> App {
        App {
            id: 7,
            name: "jobs-board".to_string(),
            secret: "app-seven-secret".to_string(),
        }
    }

    #[test]
    fn issued_token_decodes_to_the_input_claims() {
        let issued_at = Utc::now();
        let token = issue(&user(), &app(), Duration::days(365)).unwrap();

        let claims = decode(&token, "app-seven-secret").unwrap();
        assert_eq!(claims.uid, 42);
        assert_eq!(claims.phone, "+15550100");
        assert_eq!(claims.app_id, 7);

        let expected_exp = (issued_at + Duration::days(365)).timestamp();
        assert!((claims.exp - expected_exp).abs() <= 2);
    }

    #[test]
    fn empty_secret_is_a_signing_error() {
        let mut app = app();
        app.secret.clear();

        assert!(matches!(
            issue(&user(), &app, Duration::days(1)),
            Err(AuthError::Signing)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(&user(), &app(), Duration::days(1)).unwrap();

        assert!(decode(&token, "some-other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue(&user(), &app(), Duration::days(-1)).unwrap();

        assert!(decode(&token, "app-seven-secret").is_err());
    }
}
