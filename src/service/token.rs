//! Stateless tokens: password reset JWTs and email confirmation tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{auth::AuthError, AppError};

/// Seconds a password reset token stays valid.
const RESET_TOKEN_TTL_SECONDS: i64 = 600;

/// Claims carried by a password reset token.
#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    /// Username the reset was issued for.
    sub: String,
    /// Expiration as a Unix timestamp.
    exp: usize,
}

/// Issues a password reset token for the given username.
pub fn issue_reset_token(username: &str, secret: &str) -> Result<String, AppError> {
    let claims = ResetClaims {
        sub: username.to_string(),
        exp: (Utc::now().timestamp() + RESET_TOKEN_TTL_SECONDS) as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verifies a password reset token and returns the username it was issued
/// for.
///
/// Expired or tampered tokens fail with `AuthError::InvalidResetToken`
/// rather than a 500, since a stale reset link is an expected user mistake.
pub fn verify_reset_token(token: &str, secret: &str) -> Result<String, AppError> {
    let data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidResetToken)?;

    Ok(data.claims.sub)
}

/// Derives a single-use email confirmation token.
///
/// Hashes the address together with the current timestamp so two
/// registrations with the same email get distinct tokens.
pub fn confirmation_token(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(Utc::now().to_rfc3339().as_bytes());
    hex::encode(hasher.finalize())
}

/// Hashes an IP address for webhook display, so the raw address never
/// leaves the server.
pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_token_roundtrip() {
        let token = issue_reset_token("steve", "secret").unwrap();
        let username = verify_reset_token(&token, "secret").unwrap();

        assert_eq!(username, "steve");
    }

    #[test]
    fn reset_token_rejects_wrong_secret() {
        let token = issue_reset_token("steve", "secret").unwrap();

        assert!(verify_reset_token(&token, "other-secret").is_err());
    }

    #[test]
    fn reset_token_rejects_garbage() {
        assert!(verify_reset_token("not-a-token", "secret").is_err());
    }

    #[test]
    fn confirmation_tokens_are_unique_per_issue() {
        let first = confirmation_token("steve@example.com");
        let second = confirmation_token("steve@example.com");

        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
    }

    #[test]
    fn ip_hash_is_stable() {
        assert_eq!(hash_ip("127.0.0.1"), hash_ip("127.0.0.1"));
        assert_ne!(hash_ip("127.0.0.1"), hash_ip("127.0.0.2"));
    }
}
