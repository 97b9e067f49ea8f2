//! Conversation message types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the visitor.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a chat transcript.
///
/// `created_at` is kept as the ISO 8601 string the server sent; it is only
/// displayed, never compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: None,
        }
    }

    /// A user message stamped with the current UTC time.
    pub fn user_now(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content).with_created_at(chrono::Utc::now().to_rfc3339())
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_message_without_timestamp() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"system","content":"Welcome"}"#).unwrap();
        assert_eq!(msg.role, MessageRole::System);
        assert!(msg.created_at.is_none());

        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<ChatMessage, _> =
            serde_json::from_str(r#"{"role":"bot","content":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_user_now_has_timestamp() {
        let msg = ChatMessage::user_now("What is the warranty?");
        assert_eq!(msg.role, MessageRole::User);
        assert!(msg.created_at.is_some());
    }
}
