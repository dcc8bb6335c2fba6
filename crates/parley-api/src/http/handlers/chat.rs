//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST   /chat         - Send a conversation, get the assistant reply
//! - DELETE /chat?id=<id> - Delete an owned conversation
//!
//! Errors are plain text (see [`AppError`]).

use axum::Json;
use axum::extract::{Query, State};
use parley_types::chat::{ChatReply, ChatRequest};
use serde::Deserialize;

use crate::http::error::AppError;
use crate::http::extractors::session::CurrentSession;
use crate::state::AppState;

/// Query parameters for conversation deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// POST /chat - Forward the conversation to the inference service.
pub async fn send_chat(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state
        .chat_service
        .send_message(session.as_ref(), request)
        .await?;
    Ok(Json(reply))
}

/// DELETE /chat?id=<id> - Delete a conversation owned by the session user.
pub async fn delete_chat(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<DeleteQuery>,
) -> Result<&'static str, AppError> {
    state
        .chat_service
        .delete_conversation(session.as_ref(), query.id.as_deref())
        .await?;
    Ok("Chat deleted")
}
