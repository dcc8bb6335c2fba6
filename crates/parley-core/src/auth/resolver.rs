//! Session resolution capability.
//!
//! Handlers never reach for ambient auth state: the HTTP layer holds a
//! `SessionResolver`, turns the request token into `Option<Session>`, and
//! passes that explicitly into the services. Tests substitute their own
//! resolver or hand sessions in directly.

use parley_types::auth::Session;
use parley_types::error::RepositoryError;

use crate::repository::session::SessionStore;

/// Resolve a bearer token into the session it identifies.
pub trait SessionResolver: Send + Sync {
    /// Returns `None` for unknown or expired tokens.
    fn resolve_session(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;
}

impl<S: SessionStore> SessionResolver for S {
    async fn resolve_session(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        self.resolve(token).await
    }
}
