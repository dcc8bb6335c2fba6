//! Argon2id password hashing.
//!
//! Implements the `PasswordHasher` trait from `parley-core` using the
//! `argon2` crate (RustCrypto ecosystem). Hashes are PHC strings, so the
//! algorithm, parameters, and salt travel with the hash.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::RngCore;
use rand::rngs::OsRng;

use parley_core::auth::hash::PasswordHasher;
use parley_types::error::AuthError;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Argon2id implementation of `PasswordHasher`.
///
/// Uses the crate defaults (Argon2id v19, 19 MiB memory, 2 iterations,
/// 1 lane), which match the OWASP recommendation.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
