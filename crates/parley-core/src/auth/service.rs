//! Login, registration, and logout use cases.
//!
//! Every path is validate -> call collaborator -> map to a status. Errors
//! never escape: anything unexpected becomes `Failed` (logged), and
//! validation failures become `InvalidData` without touching a collaborator.

use chrono::Utc;
use parley_types::auth::{IssuedSession, LoginStatus, RegisterStatus};
use parley_types::error::{AuthError, RepositoryError};
use parley_types::user::{User, UserId};
use secrecy::ExposeSecret;
use tracing::{debug, error, info, warn};

use crate::auth::authenticator::Authenticator;
use crate::auth::hash::PasswordHasher;
use crate::auth::validate::validate_credentials;
use crate::repository::user::UserRepository;

/// Status of an auth action plus the session it opened, if any.
#[derive(Debug)]
pub struct AuthOutcome<S> {
    pub status: S,
    pub session: Option<IssuedSession>,
}

impl<S> AuthOutcome<S> {
    fn status(status: S) -> Self {
        Self {
            status,
            session: None,
        }
    }

    fn signed_in(status: S, session: IssuedSession) -> Self {
        Self {
            status,
            session: Some(session),
        }
    }
}

/// Orchestrates credential login and registration.
///
/// Generic over the user repository, password hasher, and sign-in
/// collaborator to keep parley-core free of infrastructure.
pub struct AuthService<U: UserRepository, H: PasswordHasher, A: Authenticator> {
    users: U,
    hasher: H,
    authenticator: A,
}

impl<U: UserRepository, H: PasswordHasher, A: Authenticator> AuthService<U, H, A> {
    pub fn new(users: U, hasher: H, authenticator: A) -> Self {
        Self {
            users,
            hasher,
            authenticator,
        }
    }

    /// Access the user repository.
    pub fn users(&self) -> &U {
        &self.users
    }

    /// Sign in with raw form fields.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> AuthOutcome<LoginStatus> {
        let credentials = match validate_credentials(email, password) {
            Ok(credentials) => credentials,
            Err(e) => {
                debug!(reason = %e, "Login rejected: invalid data");
                return AuthOutcome::status(LoginStatus::InvalidData);
            }
        };

        match self.authenticator.sign_in(&credentials).await {
            Ok(session) => AuthOutcome::signed_in(LoginStatus::Success, session),
            Err(AuthError::InvalidCredentials) => {
                info!("Login failed: invalid credentials");
                AuthOutcome::status(LoginStatus::Failed)
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                AuthOutcome::status(LoginStatus::Failed)
            }
        }
    }

    /// Create an account with raw form fields, then sign it in.
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> AuthOutcome<RegisterStatus> {
        let credentials = match validate_credentials(email, password) {
            Ok(credentials) => credentials,
            Err(e) => {
                debug!(reason = %e, "Registration rejected: invalid data");
                return AuthOutcome::status(RegisterStatus::InvalidData);
            }
        };

        match self.users.get_by_email(&credentials.email).await {
            Ok(Some(existing)) => {
                info!(user_id = %existing.id, "Registration rejected: user exists");
                return AuthOutcome::status(RegisterStatus::UserExists);
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Registration failed: user lookup");
                return AuthOutcome::status(RegisterStatus::Failed);
            }
        }

        let password_hash = match self
            .hasher
            .hash_password(credentials.password.expose_secret())
        {
            Ok(hash) => hash,
            Err(e) => {
                error!(error = %e, "Registration failed: password hashing");
                return AuthOutcome::status(RegisterStatus::Failed);
            }
        };

        let user = User {
            id: UserId::new(),
            email: credentials.email.clone(),
            password_hash,
            created_at: Utc::now(),
        };

        match self.users.create(&user).await {
            Ok(created) => info!(user_id = %created.id, "User registered"),
            // Lost a race with a concurrent registration for the same email.
            Err(RepositoryError::Conflict(_)) => {
                info!("Registration rejected: user exists");
                return AuthOutcome::status(RegisterStatus::UserExists);
            }
            Err(e) => {
                error!(error = %e, "Registration failed: user insert");
                return AuthOutcome::status(RegisterStatus::Failed);
            }
        }

        match self.authenticator.sign_in(&credentials).await {
            Ok(session) => AuthOutcome::signed_in(RegisterStatus::Success, session),
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "User created but sign-in failed");
                AuthOutcome::status(RegisterStatus::CreatedSignInFailed)
            }
        }
    }

    /// Close a session. Failures are logged, never surfaced.
    pub async fn logout(&self, token: &str) {
        if let Err(e) = self.authenticator.sign_out(token).await {
            warn!(error = %e, "Failed to revoke session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryUserRepository, PlainHasher, ScriptedAuthenticator, user_with_password};

    fn service(
        users: MemoryUserRepository,
        authenticator: ScriptedAuthenticator,
    ) -> AuthService<MemoryUserRepository, PlainHasher, ScriptedAuthenticator> {
        AuthService::new(users, PlainHasher, authenticator)
    }

    #[tokio::test]
    async fn test_login_invalid_data_calls_no_collaborator() {
        let auth = ScriptedAuthenticator::accepting();
        let svc = service(MemoryUserRepository::default(), auth.clone());

        for (email, password) in [
            (Some("not-an-email"), Some("secret1")),
            (Some("user@example.com"), Some("12345")),
            (None, Some("secret1")),
            (Some("user@example.com"), None),
        ] {
            let outcome = svc.login(email, password).await;
            assert_eq!(outcome.status, LoginStatus::InvalidData);
            assert!(outcome.session.is_none());
        }
        assert_eq!(auth.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn test_login_success() {
        let svc = service(MemoryUserRepository::default(), ScriptedAuthenticator::accepting());
        let outcome = svc.login(Some("ada@example.com"), Some("secret1")).await;
        assert_eq!(outcome.status, LoginStatus::Success);
        assert!(outcome.session.is_some());
    }

    #[tokio::test]
    async fn test_login_sign_in_error_is_failed() {
        let svc = service(MemoryUserRepository::default(), ScriptedAuthenticator::rejecting());
        let outcome = svc.login(Some("ada@example.com"), Some("secret1")).await;
        assert_eq!(outcome.status, LoginStatus::Failed);
        assert!(outcome.session.is_none());

        let svc = service(MemoryUserRepository::default(), ScriptedAuthenticator::broken());
        let outcome = svc.login(Some("ada@example.com"), Some("secret1")).await;
        assert_eq!(outcome.status, LoginStatus::Failed);
    }

    #[tokio::test]
    async fn test_login_normalizes_email() {
        let auth = ScriptedAuthenticator::accepting();
        let svc = service(MemoryUserRepository::default(), auth.clone());
        svc.login(Some("User@Example.com"), Some("secret1")).await;
        assert_eq!(auth.last_email().as_deref(), Some("user@example.com"));
    }

    #[tokio::test]
    async fn test_register_invalid_data_calls_no_collaborator() {
        let users = MemoryUserRepository::default();
        let auth = ScriptedAuthenticator::accepting();
        let svc = service(users.clone(), auth.clone());

        let outcome = svc.register(Some("bad@"), Some("secret1")).await;
        assert_eq!(outcome.status, RegisterStatus::InvalidData);
        let outcome = svc.register(Some("ada@example.com"), Some("short")).await;
        assert_eq!(outcome.status, RegisterStatus::InvalidData);

        assert_eq!(users.lookup_calls(), 0);
        assert_eq!(users.create_calls(), 0);
        assert_eq!(auth.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_existing_user_does_not_create() {
        let users = MemoryUserRepository::default();
        users.insert(user_with_password("ada@example.com", "secret1"));
        let auth = ScriptedAuthenticator::accepting();
        let svc = service(users.clone(), auth.clone());

        // Differently cased email names the same identity.
        let outcome = svc.register(Some("ADA@Example.com"), Some("another1")).await;
        assert_eq!(outcome.status, RegisterStatus::UserExists);
        assert_eq!(users.create_calls(), 0);
        assert_eq!(auth.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_creates_user_and_signs_in() {
        let users = MemoryUserRepository::default();
        let auth = ScriptedAuthenticator::accepting();
        let svc = service(users.clone(), auth.clone());

        let outcome = svc.register(Some("Ada@Example.com"), Some("secret1")).await;
        assert_eq!(outcome.status, RegisterStatus::Success);
        assert!(outcome.session.is_some());

        let stored = users.get("ada@example.com").unwrap();
        assert_eq!(stored.password_hash, PlainHasher::hashed("secret1"));
        assert_eq!(auth.sign_in_calls(), 1);
        assert_eq!(auth.last_email().as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_register_insert_conflict_is_user_exists() {
        let users = MemoryUserRepository::racing();
        users.insert(user_with_password("ada@example.com", "secret1"));
        let auth = ScriptedAuthenticator::accepting();
        let svc = service(users.clone(), auth.clone());

        let outcome = svc.register(Some("ada@example.com"), Some("another1")).await;
        assert_eq!(outcome.status, RegisterStatus::UserExists);
        assert!(outcome.session.is_none());
        assert_eq!(users.lookup_calls(), 1);
        assert_eq!(users.create_calls(), 1);
        assert_eq!(auth.sign_in_calls(), 0);
        assert_eq!(
            users.get("ada@example.com").unwrap().password_hash,
            PlainHasher::hashed("secret1")
        );
    }

    #[tokio::test]
    async fn test_register_sign_in_failure_is_distinct() {
        let users = MemoryUserRepository::default();
        let svc = service(users.clone(), ScriptedAuthenticator::broken());

        let outcome = svc.register(Some("ada@example.com"), Some("secret1")).await;
        assert_eq!(outcome.status, RegisterStatus::CreatedSignInFailed);
        assert!(users.get("ada@example.com").is_some());
    }

    #[tokio::test]
    async fn test_register_storage_failure_is_failed() {
        let users = MemoryUserRepository::failing();
        let svc = service(users, ScriptedAuthenticator::accepting());
        let outcome = svc.register(Some("ada@example.com"), Some("secret1")).await;
        assert_eq!(outcome.status, RegisterStatus::Failed);
    }

    #[tokio::test]
    async fn test_logout_delegates_to_authenticator() {
        let auth = ScriptedAuthenticator::accepting();
        let svc = service(MemoryUserRepository::default(), auth.clone());
        svc.logout("prl_token").await;
        assert_eq!(auth.sign_out_calls(), 1);
    }
}
