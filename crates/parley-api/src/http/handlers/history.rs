//! GET /history - The session user's conversations, newest first.

use axum::Json;
use axum::extract::State;
use parley_types::chat::Conversation;

use crate::http::error::JsonError;
use crate::http::extractors::session::CurrentSession;
use crate::state::AppState;

pub async fn get_history(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Conversation>>, JsonError> {
    let conversations = state.chat_service.list_history(session.as_ref()).await?;
    Ok(Json(conversations))
}
