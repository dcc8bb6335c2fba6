//! Conversation and message types.
//!
//! A conversation is a client-named, user-owned, ordered list of messages.
//! The client always sends the whole conversation, so persistence replaces
//! the stored list rather than appending to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub user_id: UserId,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub id: String,
    pub messages: Vec<Message>,
}

/// Whether the exchange behind a delivered reply was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistStatus {
    /// Conversation stored with the new assistant reply.
    Saved,
    /// Reply delivered but the storage write failed.
    NotSaved,
    /// The session carries no user identity, so nothing was stored.
    Anonymous,
}

impl fmt::Display for PersistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistStatus::Saved => write!(f, "saved"),
            PersistStatus::NotSaved => write!(f, "not_saved"),
            PersistStatus::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// Body of a successful `POST /chat` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub persisted: PersistStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("tool".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_chat_request_deserialize() {
        let body = r#"{"id":"c1","messages":[{"role":"user","content":"hi"}]}"#;
        let req: ChatRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.id, "c1");
        assert_eq!(req.messages, vec![Message::new(MessageRole::User, "hi")]);
    }

    #[test]
    fn test_chat_reply_serialize() {
        let reply = ChatReply {
            message: "hello".to_string(),
            persisted: PersistStatus::NotSaved,
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["message"], "hello");
        assert_eq!(json["persisted"], "not_saved");
    }
}
