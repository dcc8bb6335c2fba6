//! Session token generation and hashing.
//!
//! Tokens are 32 random bytes rendered as `prl_<hex>`. Only the SHA-256 hash
//! of a token is stored, so a leaked database does not leak live sessions.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Prefix that makes Parley tokens recognizable in logs and secret scanners.
pub const TOKEN_PREFIX: &str = "prl_";

/// Generate a new random session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    format!(
        "{TOKEN_PREFIX}{}",
        bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
    )
}

/// Compute SHA-256 hash of a token (lowercase hex).
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}
