//! SQLite session store.
//!
//! Rows are keyed by the SHA-256 of the bearer token. Expired rows are
//! ignored on resolve and pruned opportunistically when new sessions open.

use chrono::{Duration, Utc};
use parley_core::repository::session::SessionStore;
use parley_types::auth::{IssuedSession, Session};
use parley_types::error::RepositoryError;
use parley_types::user::{User, UserId};
use secrecy::SecretString;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};
use crate::crypto::token::{generate_token, hash_token};

/// SQLite-backed implementation of `SessionStore`.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Delete every expired session. Returns the number of rows removed.
    pub async fn prune_expired(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(format_datetime(&Utc::now()))
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected())
    }
}

struct SessionRow {
    id: String,
    user_id: Option<String>,
    email: Option<String>,
    created_at: String,
    expires_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
            expires_at: row.try_get("expires_at")?,
        })
    }

    fn into_session(self) -> Result<Session, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let user_id = self
            .user_id
            .map(|raw| raw.parse::<UserId>())
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;

        Ok(Session {
            id,
            user_id,
            email: self.email,
            created_at: parse_datetime(&self.created_at)?,
            expires_at: parse_datetime(&self.expires_at)?,
        })
    }
}

impl SessionStore for SqliteSessionStore {
    async fn create(&self, user: &User, ttl: Duration) -> Result<IssuedSession, RepositoryError> {
        if let Err(e) = self.prune_expired().await {
            tracing::warn!(error = %e, "failed to prune expired sessions");
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .filter(|expires_at| *expires_at > now)
            .ok_or_else(|| RepositoryError::Query(format!("invalid session ttl: {ttl}")))?;

        let token = generate_token();
        let session = Session {
            id: Uuid::now_v7(),
            user_id: Some(user.id),
            email: Some(user.email.clone()),
            created_at: now,
            expires_at,
        };

        sqlx::query(
            "INSERT INTO sessions (id, token_hash, user_id, created_at, expires_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(session.id.to_string())
        .bind(hash_token(&token))
        .bind(user.id.to_string())
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.expires_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        tracing::debug!(session_id = %session.id, user_id = %user.id, "session created");

        Ok(IssuedSession {
            token: SecretString::from(token),
            session,
        })
    }

    async fn resolve(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query(
            "SELECT s.id, s.user_id, u.email, s.created_at, s.expires_at \
             FROM sessions s LEFT JOIN users u ON u.id = s.user_id \
             WHERE s.token_hash = ? AND s.expires_at > ?",
        )
        .bind(hash_token(token))
        .bind(format_datetime(&Utc::now()))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        match row {
            Some(row) => {
                let session_row = SessionRow::from_row(&row).map_err(query_error)?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(hash_token(token))
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }
}
