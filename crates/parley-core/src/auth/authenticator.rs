//! Credential sign-in.
//!
//! `Authenticator` is the sign-in collaborator used by both login and the
//! sign-in step after registration. `PasswordAuthenticator` is the default
//! implementation: look the user up, verify the password hash, open a
//! session.

use chrono::Duration;
use parley_types::auth::{Credentials, IssuedSession};
use parley_types::error::AuthError;
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::auth::hash::PasswordHasher;
use crate::repository::session::SessionStore;
use crate::repository::user::UserRepository;

/// Signs users in and out.
pub trait Authenticator: Send + Sync {
    /// Verify credentials and open a session.
    ///
    /// Unknown users and wrong passwords both yield `AuthError::InvalidCredentials`.
    fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<IssuedSession, AuthError>> + Send;

    /// Close the session identified by `token`.
    fn sign_out(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;
}

/// Password-based [`Authenticator`] over a user repository and session store.
pub struct PasswordAuthenticator<U: UserRepository, S: SessionStore, H: PasswordHasher> {
    users: U,
    sessions: S,
    hasher: H,
    session_ttl: Duration,
}

impl<U: UserRepository, S: SessionStore, H: PasswordHasher> PasswordAuthenticator<U, S, H> {
    pub fn new(users: U, sessions: S, hasher: H, session_ttl: Duration) -> Self {
        Self {
            users,
            sessions,
            hasher,
            session_ttl,
        }
    }
}

impl<U: UserRepository, S: SessionStore, H: PasswordHasher> Authenticator
    for PasswordAuthenticator<U, S, H>
{
    async fn sign_in(&self, credentials: &Credentials) -> Result<IssuedSession, AuthError> {
        let Some(user) = self.users.get_by_email(&credentials.email).await? else {
            debug!("Sign-in rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify_password(credentials.password.expose_secret(), &user.password_hash)
        {
            debug!(user_id = %user.id, "Sign-in rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.sessions.create(&user, self.session_ttl).await?;
        info!(user_id = %user.id, session_id = %issued.session.id, "User signed in");
        Ok(issued)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.revoke(token).await?;
        Ok(())
    }
}
