//! Session store trait definition.

use chrono::Duration;
use parley_types::auth::{IssuedSession, Session};
use parley_types::error::RepositoryError;
use parley_types::user::User;

/// Persistence for bearer-token sessions.
///
/// Implementations generate the token, store only a hash of it, and hand the
/// plaintext back exactly once inside [`IssuedSession`].
pub trait SessionStore: Send + Sync {
    /// Open a session for `user` that expires after `ttl`.
    fn create(
        &self,
        user: &User,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<IssuedSession, RepositoryError>> + Send;

    /// Resolve a plaintext token. Unknown and expired tokens resolve to `None`.
    fn resolve(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Revoke a token. Revoking an unknown token is not an error.
    fn revoke(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
