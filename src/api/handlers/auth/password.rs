//! Password hashing with Argon2id.
//!
//! Hashes embed their own salt (PHC string format), so two hashes of the same
//! password differ and are never compared with `==`.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password with a fresh random salt.
pub(super) fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {err}"))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash string.
///
/// A malformed stored hash counts as a failed match, not an error; a corrupt
/// row must never take down the login handler.
pub(super) fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() -> Result<()> {
        let hash = hash_password("pw1")?;
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("pw2", &hash));
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<()> {
        // Same input, fresh salt, different output.
        let first = hash_password("pw1")?;
        let second = hash_password("pw1")?;
        assert_ne!(first, second);
        assert!(verify_password("pw1", &first));
        assert!(verify_password("pw1", &second));
        Ok(())
    }

    #[test]
    fn malformed_hash_is_a_failed_match() {
        assert!(!verify_password("pw1", "not-a-phc-string"));
        assert!(!verify_password("pw1", ""));
        assert!(!verify_password("pw1", "$argon2id$corrupted"));
    }
}
