//! Infrastructure layer for Parley.
//!
//! Contains implementations of the traits defined in `parley-core`:
//! SQLite storage for users, sessions, and conversations, Argon2id password
//! hashing, session token generation, the HTTP inference client, and
//! configuration loading.

pub mod config;
pub mod crypto;
pub mod inference;
pub mod sqlite;
