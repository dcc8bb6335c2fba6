//! HTTP layer for Parley.
//!
//! Axum routes for credential auth, chat, and history. Sessions are resolved
//! per request by the [`extractors::session::CurrentSession`] extractor.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
