//! Hex-encoded random values from the OS CSPRNG.

use crate::error::AuthError;

/// Bytes of entropy in a session token or salt (32 hex chars).
pub const RANDOM_BYTES: usize = 16;

/// Generate `RANDOM_BYTES` random bytes, hex-encoded.
///
/// # Errors
///
/// Returns `AuthError::Random` if the OS random source fails.
pub fn random_hex() -> Result<String, AuthError> {
    let mut bytes = [0u8; RANDOM_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::Random(e.to_string()))?;
    Ok(hex::encode(bytes))
}
