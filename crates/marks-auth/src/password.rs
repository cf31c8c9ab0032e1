//! Salted SHA-256 password hashing.
//!
//! `hash = hex(sha256(password || salt))`, where the salt is itself a
//! hex string. Single pass, no stretching: stored hashes depend on it.

use sha2::{Digest, Sha256};

use crate::error::AuthError;
use crate::random::random_hex;

/// A password digest and the salt it was computed with, both hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

/// Hash `password` with `salt`, or with a fresh random salt when `None`.
///
/// # Errors
///
/// Returns `AuthError::Random` if a salt must be generated and the OS random
/// source fails.
pub fn hash_password(password: &str, salt: Option<&str>) -> Result<HashedPassword, AuthError> {
    let salt = match salt {
        Some(salt) => salt.to_string(),
        None => random_hex()?,
    };
    Ok(HashedPassword {
        hash: digest(password, &salt),
        salt,
    })
}

/// Check `password` against a stored hash and salt.
#[must_use]
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    constant_time_eq(digest(password, salt).as_bytes(), expected_hash.as_bytes())
}

fn digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
