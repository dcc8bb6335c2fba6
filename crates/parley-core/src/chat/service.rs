//! Chat service: send a conversation to the inference service and persist
//! the exchange, delete a conversation, list a user's history.
//!
//! Sessions arrive as an explicit `Option<&Session>` resolved by the caller.
//! The service never looks up auth state on its own.

use chrono::Utc;
use parley_types::auth::Session;
use parley_types::chat::{ChatReply, ChatRequest, Conversation, Message, MessageRole, PersistStatus};
use parley_types::error::ChatError;
use parley_types::user::UserId;
use tracing::{error, info, warn};

use crate::chat::inference::{InferenceClient, InferenceRequest, build_prompt};
use crate::chat::repository::ChatRepository;

/// Orchestrates the chat and history use cases.
///
/// Generic over `ChatRepository` and `InferenceClient` to maintain
/// clean architecture (parley-core never depends on parley-infra).
pub struct ChatService<C: ChatRepository, I: InferenceClient> {
    chat_repo: C,
    inference: I,
    enable_search: bool,
}

impl<C: ChatRepository, I: InferenceClient> ChatService<C, I> {
    /// Create a new chat service.
    pub fn new(chat_repo: C, inference: I, enable_search: bool) -> Self {
        Self {
            chat_repo,
            inference,
            enable_search,
        }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    /// Send the conversation to the inference service and store the exchange.
    ///
    /// Inference failures are errors and nothing is stored. A storage failure
    /// after a successful reply is not an error: the reply is returned with
    /// `PersistStatus::NotSaved`.
    pub async fn send_message(
        &self,
        session: Option<&Session>,
        request: ChatRequest,
    ) -> Result<ChatReply, ChatError> {
        let session = session.ok_or(ChatError::Unauthorized)?;

        let inference_request = InferenceRequest {
            prompt: build_prompt(&request.messages),
            enable_search: self.enable_search,
        };

        let reply = self
            .inference
            .generate(&inference_request)
            .await
            .inspect_err(|e| error!(chat_id = %request.id, error = %e, "Inference call failed"))?;

        let persisted = match session.user_id {
            Some(user_id) => self.persist(request, user_id, &reply).await,
            None => PersistStatus::Anonymous,
        };

        Ok(ChatReply {
            message: reply,
            persisted,
        })
    }

    async fn persist(&self, request: ChatRequest, user_id: UserId, reply: &str) -> PersistStatus {
        let mut messages = request.messages;
        messages.push(Message::new(MessageRole::Assistant, reply));

        let conversation = Conversation {
            id: request.id,
            user_id,
            messages,
            created_at: Utc::now(),
        };

        match self.chat_repo.save(&conversation).await {
            Ok(()) => {
                info!(
                    chat_id = %conversation.id,
                    user_id = %user_id,
                    message_count = conversation.messages.len(),
                    "Conversation saved"
                );
                PersistStatus::Saved
            }
            Err(e) => {
                error!(chat_id = %conversation.id, user_id = %user_id, error = %e, "Failed to save chat");
                PersistStatus::NotSaved
            }
        }
    }

    /// Delete a conversation owned by the session user.
    ///
    /// A missing conversation is reported as `Unauthorized`, the same as one
    /// owned by someone else, so callers cannot probe for existing ids.
    pub async fn delete_conversation(
        &self,
        session: Option<&Session>,
        id: Option<&str>,
    ) -> Result<(), ChatError> {
        let id = id.filter(|id| !id.is_empty()).ok_or(ChatError::NotFound)?;
        let user_id = session
            .and_then(|s| s.user_id)
            .ok_or(ChatError::Unauthorized)?;

        let conversation = self.chat_repo.get_by_id(id).await?;
        match conversation {
            Some(conversation) if conversation.user_id == user_id => {
                self.chat_repo.delete_by_id(id).await?;
                info!(chat_id = %id, user_id = %user_id, "Conversation deleted");
                Ok(())
            }
            _ => {
                warn!(chat_id = %id, user_id = %user_id, "Delete rejected: not owner");
                Err(ChatError::Unauthorized)
            }
        }
    }

    /// List the session user's conversations, newest first.
    pub async fn list_history(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<Conversation>, ChatError> {
        let user_id = session
            .and_then(|s| s.user_id)
            .ok_or(ChatError::Unauthorized)?;

        let conversations = self.chat_repo.list_by_user(&user_id).await?;
        Ok(conversations)
    }
}
