//! Remote chat contract.
//!
//! The widget depends on this trait only; the HTTP implementation lives in
//! `aqua-interaction`.

use super::message::ChatMessage;
use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Absent on the first message of a new conversation; serialized as `null`.
    pub session_id: Option<String>,
    pub message: String,
}

/// Response of `POST /chat`.
///
/// `messages` is the authoritative transcript and fully replaces client state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    pub messages: Vec<ChatMessage>,
}

/// Response of `GET /chat/{session_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// An abstract client for the remote chat endpoints.
///
/// Implementations must be cancel-safe: the caller may drop the returned
/// future at any await point when a request is superseded or torn down.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetches the stored transcript for `session_id`.
    async fn fetch_history(&self, session_id: &str) -> Result<ChatHistoryResponse, ApiError>;

    /// Sends one user message, creating a session when `session_id` is absent.
    async fn send_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::MessageRole;

    #[test]
    fn test_request_serializes_null_session() {
        let request = ChatRequest {
            session_id: None,
            message: "What is the warranty?".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "session_id": null, "message": "What is the warranty?" })
        );
    }

    #[test]
    fn test_response_deserializes() {
        let json = r#"{
            "session_id": "abc123",
            "reply": "Five years.",
            "messages": [
                {"role": "user", "content": "What is the warranty?", "created_at": "2024-05-01T10:00:00+00:00"},
                {"role": "assistant", "content": "Five years."}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.session_id, "abc123");
        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.messages[1].role, MessageRole::Assistant);
    }
}
