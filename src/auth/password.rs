/// Password Hashing and Verification
///
/// bcrypt with a per-call random salt. The plaintext is never stored and
/// never logged; only the digest reaches the database.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

/// Hash a password using bcrypt
///
/// Equal plaintexts produce distinct digests because the salt is
/// randomized on every call.
///
/// # Errors
/// Returns error if bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash
///
/// The salt is recovered from the digest itself. A malformed stored hash
/// is an internal fault, not a wrong-password outcome.
///
/// # Errors
/// Returns error if verification fails
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}
