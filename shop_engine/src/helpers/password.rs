//! Password hashing.
//!
//! Both functions are stateless. Hashes are PHC strings produced by Argon2id with a random salt, so the same password
//! never hashes to the same credential twice.
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Could not hash password: {0}")]
pub struct PasswordHashError(String);

pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordHashError(e.to_string()))
}

/// Returns true if `attempt` matches the stored credential. A malformed credential never matches.
pub fn verify_password(credential: &str, attempt: &str) -> bool {
    match PasswordHash::new(credential) {
        Ok(hash) => Argon2::default().verify_password(attempt.as_bytes(), &hash).is_ok(),
        Err(_) => false,
    }
}
