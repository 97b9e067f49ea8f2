//! HttpChatApi - REST implementation of the chat contract.

use crate::api_client::{ApiClient, require_body};
use aqua_core::chat::{ChatApi, ChatHistoryResponse, ChatRequest, ChatResponse};
use aqua_core::error::ApiError;
use async_trait::async_trait;

/// Talks to `GET /chat/{session_id}` and `POST /chat`.
#[derive(Clone, Debug)]
pub struct HttpChatApi {
    client: ApiClient,
}

impl HttpChatApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_history(&self, session_id: &str) -> Result<ChatHistoryResponse, ApiError> {
        let path = format!("/chat/{}", session_id);
        require_body(self.client.get(&path).await?)
    }

    async fn send_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatResponse, ApiError> {
        let body = ChatRequest {
            session_id: session_id.map(str::to_string),
            message: message.to_string(),
        };
        require_body(self.client.post_json("/chat", &body).await?)
    }
}
