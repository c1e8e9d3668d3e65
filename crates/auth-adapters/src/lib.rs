//! # auth-adapters
//!
//! Argon2-based implementation of the `PasswordHasher` port.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use domains::error::{DomainError, Result};
use domains::traits::PasswordHasher;

/// Salted argon2id hashing with the crate's default parameters. The PHC
/// output string is self-contained, so parameters can be tuned later
/// without invalidating hashes already stored.
#[derive(Debug, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| DomainError::Internal(format!("argon2 hashing failed: {err}")))
    }

    /// A stored value that does not parse as a PHC string is a mismatch,
    /// not an error: login must stay a yes/no question.
    fn verify(&self, password: &str, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::debug!("stored credential is not a parseable hash");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("correct horse battery staple").unwrap();
        assert!(hasher.verify("correct horse battery staple", &hash));
        assert!(!hasher.verify("incorrect horse", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2PasswordHasher;
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn cleartext_never_appears_in_the_hash() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("hunter2").unwrap();
        assert!(!hash.contains("hunter2"));
    }

    #[test]
    fn garbage_stored_value_is_just_a_mismatch() {
        let hasher = Argon2PasswordHasher;
        assert!(!hasher.verify("anything", "not a phc string"));
        assert!(!hasher.verify("anything", ""));
    }
}
