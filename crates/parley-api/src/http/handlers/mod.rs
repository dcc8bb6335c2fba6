//! HTTP request handlers.

pub mod auth;
pub mod chat;
pub mod history;
