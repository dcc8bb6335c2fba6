//! SQLite user repository implementation.

use parley_core::repository::user::UserRepository;
use parley_types::error::RepositoryError;
use parley_types::user::{User, UserId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `UserRepository`.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let id: UserId = self
            .id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;

        Ok(User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let user_row = UserRow::from_row(&row).map_err(query_error)?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(user.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("email '{}' already registered", user.email)),
            ),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            let user_row = UserRow::from_row(row).map_err(query_error)?;
            users.push(user_row.into_user()?);
        }

        Ok(users)
    }
}
