//! Password hashing and verification.
//!
//! Passwords are stored as argon2 PHC strings. Verification treats a
//! mismatch as a normal `false` result; only a malformed stored hash is an
//! error, since that indicates corrupted data rather than a wrong password.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::error::{internal::InternalError, AppError};

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match
/// - `Err(AppError::InternalErr(MalformedPasswordHash))` - Stored hash is not
///   valid PHC format
pub fn verify_password(password: &str, stored_hash: &str, user_id: i32) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| InternalError::MalformedPasswordHash {
        user_id,
        reason: e.to_string(),
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("hunter22").unwrap();

        assert!(verify_password("hunter22", &hash, 1).unwrap());
        assert!(!verify_password("hunter23", &hash, 1).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = verify_password("hunter22", "not-a-phc-string", 7);

        assert!(result.is_err());
    }
}
