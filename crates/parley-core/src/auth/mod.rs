//! Credential authentication: validation, sign-in, session resolution,
//! and the login/register/logout use cases.

pub mod authenticator;
pub mod hash;
pub mod resolver;
pub mod service;
pub mod validate;
