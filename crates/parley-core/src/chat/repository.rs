//! ChatRepository trait definition.
//!
//! Provides save/read/delete/list for conversations.
//! Follows the same RPITIT pattern as UserRepository.

use parley_types::chat::Conversation;
use parley_types::error::RepositoryError;
use parley_types::user::UserId;

/// Repository trait for conversation persistence.
///
/// Implementations live in parley-infra (e.g., `SqliteChatRepository`).
pub trait ChatRepository: Send + Sync {
    /// Create or replace a conversation.
    ///
    /// Replacing keeps the original `created_at`. A conversation id owned by
    /// a different user is rejected with `RepositoryError::Conflict`.
    fn save(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a conversation by id.
    fn get_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Delete a conversation by id. Deleting a missing id is not an error.
    fn delete_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All conversations owned by a user, newest first.
    fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;
}
