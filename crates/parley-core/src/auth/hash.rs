//! PasswordHasher trait for storing and checking passwords.
//!
//! Defined in parley-core so services can hash passwords without coupling to
//! a specific algorithm. The `Argon2PasswordHasher` adapter lives in
//! parley-infra.

use parley_types::error::AuthError;

/// Abstraction over one-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string (salt included).
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Malformed hashes verify as `false`.
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}
