//! Shared domain types for Parley.
//!
//! This crate contains the domain types used across the Parley chat server:
//! users, credentials, sessions, conversations, messages, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, secrecy.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod user;
