//! Business logic and repository trait definitions for Parley.
//!
//! This crate defines the "ports" (repository and collaborator traits) that
//! the infrastructure layer implements, and the services that compose them.
//! It depends only on `parley-types` -- never on `parley-infra` or any
//! database/IO crate.

pub mod auth;
pub mod chat;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;
