//! Cryptographic operations for Parley.
//!
//! - `password`: Argon2id password hashing
//! - `token`: session token generation and SHA-256 token hashing

pub mod password;
pub mod token;
