//! SQLite chat repository implementation.
//!
//! Messages are stored as a JSON array in a single TEXT column. The client
//! always sends the whole conversation, so a save replaces the array.

use parley_core::chat::repository::ChatRepository;
use parley_types::chat::{Conversation, Message};
use parley_types::error::RepositoryError;
use parley_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `ChatRepository`.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ChatRow {
    id: String,
    user_id: String,
    messages: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            messages: row.try_get("messages")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        let user_id: UserId = self
            .user_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let messages: Vec<Message> = serde_json::from_str(&self.messages)
            .map_err(|e| RepositoryError::Query(format!("invalid messages for chat {}: {e}", self.id)))?;

        Ok(Conversation {
            id: self.id,
            user_id,
            messages,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl ChatRepository for SqliteChatRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let messages = serde_json::to_string(&conversation.messages)
            .map_err(|e| RepositoryError::Query(format!("failed to encode messages: {e}")))?;

        // The WHERE clause on the upsert keeps another user's row untouched;
        // zero affected rows means the id belongs to someone else.
        let result = sqlx::query(
            "INSERT INTO chats (id, user_id, messages, created_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET messages = excluded.messages \
             WHERE chats.user_id = excluded.user_id",
        )
        .bind(&conversation.id)
        .bind(conversation.user_id.to_string())
        .bind(&messages)
        .bind(format_datetime(&conversation.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(format!(
                "chat '{}' belongs to another user",
                conversation.id
            )));
        }

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let chat_row = ChatRow::from_row(&row).map_err(query_error)?;
                Ok(Some(chat_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Conversation>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chats WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut conversations = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row = ChatRow::from_row(row).map_err(query_error)?;
            conversations.push(chat_row.into_conversation()?);
        }

        Ok(conversations)
    }
}
