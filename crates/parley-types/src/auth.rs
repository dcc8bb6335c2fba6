//! Credential, session, and auth-outcome types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

use crate::user::UserId;

/// Minimum accepted password length, in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A validated email/password pair.
///
/// Only constructed by the credential validator in `parley-core`, so the
/// email is already lowercase. Lives for the duration of a single request.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// An authenticated actor, resolved per request from a bearer token.
///
/// `user_id` is optional: a session that does not carry a user identity is
/// treated as unauthorized by every handler that needs one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// A freshly created session plus the plaintext token handed to the client.
///
/// The token is shown once; only its hash is persisted.
#[derive(Debug)]
pub struct IssuedSession {
    pub token: SecretString,
    pub session: Session,
}

/// Outcome of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginStatus {
    Success,
    Failed,
    InvalidData,
}

impl fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginStatus::Success => write!(f, "success"),
            LoginStatus::Failed => write!(f, "failed"),
            LoginStatus::InvalidData => write!(f, "invalid_data"),
        }
    }
}

/// Outcome of a registration attempt.
///
/// `CreatedSignInFailed` reports that the account now exists but the
/// follow-up sign-in did not succeed, so the client should send the user to
/// the login form instead of retrying registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterStatus {
    Success,
    Failed,
    UserExists,
    InvalidData,
    CreatedSignInFailed,
}

impl fmt::Display for RegisterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterStatus::Success => write!(f, "success"),
            RegisterStatus::Failed => write!(f, "failed"),
            RegisterStatus::UserExists => write!(f, "user_exists"),
            RegisterStatus::InvalidData => write!(f, "invalid_data"),
            RegisterStatus::CreatedSignInFailed => write!(f, "created_sign_in_failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_serde_matches_display() {
        for status in [
            RegisterStatus::Success,
            RegisterStatus::Failed,
            RegisterStatus::UserExists,
            RegisterStatus::InvalidData,
            RegisterStatus::CreatedSignInFailed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
        let json = serde_json::to_string(&LoginStatus::InvalidData).unwrap();
        assert_eq!(json, "\"invalid_data\"");
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session {
            id: Uuid::now_v7(),
            user_id: Some(UserId::new()),
            email: Some("ada@example.com".to_string()),
            created_at: now,
            expires_at: now + Duration::hours(1),
        };
        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + Duration::hours(2)));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            email: "ada@example.com".to_string(),
            password: SecretString::from("hunter22".to_string()),
        };
        assert!(!format!("{creds:?}").contains("hunter22"));
    }
}
