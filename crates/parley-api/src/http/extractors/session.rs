//! Session extractors.
//!
//! The request token is read from:
//! - `Authorization: Bearer <token>` header
//! - `parley_session` cookie
//!
//! The header wins when both are present. Unknown, expired, and unreadable
//! tokens all resolve to "no session"; handlers decide what that means.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;

use parley_core::auth::resolver::SessionResolver;
use parley_types::auth::Session;

use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "parley_session";

/// The session behind the request, if any.
pub struct CurrentSession(pub Option<Session>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(&parts.headers) else {
            return Ok(CurrentSession(None));
        };

        match state.sessions.resolve_session(&token).await {
            Ok(session) => Ok(CurrentSession(session)),
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed, treating as anonymous");
                Ok(CurrentSession(None))
            }
        }
    }
}

/// The raw request token, unresolved. Used by logout to revoke it.
pub struct SessionToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(extract_token(&parts.headers)))
    }
}

/// Extract the session token from request headers.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
