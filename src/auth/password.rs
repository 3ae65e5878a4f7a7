use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::ApiError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plain-text password with Argon2 and a fresh salt.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    if plain.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a plain-text password against a stored hash.
/// A malformed stored hash verifies as false rather than erroring out.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password!", &hash));
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(hash_password("short").is_err());
    }

    #[test]
    fn garbage_stored_hash_never_verifies() {
        assert!(!verify_password("anything-at-all", "not-a-phc-string"));
    }
}
