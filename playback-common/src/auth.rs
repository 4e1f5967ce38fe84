//! Password hashing and verification
//!
//! # Architecture
//!
//! - Each user gets a fresh random salt at signup
//! - Stored value is the hex SHA-256 of `salt || password`
//! - Verification recomputes the hash and compares
//!
//! # Pure Functions
//!
//! This module contains ONLY pure functions. No HTTP framework or database
//! dependencies - those live in module-specific code.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Length of the random salt in bytes (stored as 32 hex characters)
const SALT_BYTES: usize = 16;

/// Generate a fresh random salt, hex encoded
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash a password with the given salt
///
/// Returns the SHA-256 of `salt || password` as 64 hex characters.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify a password attempt against a stored hash and salt
pub fn verify_password(attempt: &str, salt: &str, stored_hash: &str) -> bool {
    hash_password(attempt, salt) == stored_hash
}
