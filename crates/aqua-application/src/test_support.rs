//! Scripted `ChatApi` used by the application tests.

use aqua_core::chat::{ChatApi, ChatHistoryResponse, ChatMessage, ChatResponse, MessageRole};
use aqua_core::error::ApiError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One scripted reply, optionally held until its gate is opened.
pub(crate) struct Scripted<T> {
    result: Result<T, ApiError>,
    gate: Option<Arc<Notify>>,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self {
            result: Ok(value),
            gate: None,
        }
    }

    pub fn err(err: ApiError) -> Self {
        Self {
            result: Err(err),
            gate: None,
        }
    }

    /// Holds the reply until `gate.notify_one()` is called.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[derive(Default)]
pub(crate) struct MockChatApi {
    history: Mutex<VecDeque<Scripted<ChatHistoryResponse>>>,
    sends: Mutex<VecDeque<Scripted<ChatResponse>>>,
    history_calls: AtomicUsize,
    send_calls: AtomicUsize,
    sent_sessions: Mutex<Vec<(Option<String>, String)>>,
    /// Notified each time a request reaches the mock.
    pub started: Notify,
}

impl MockChatApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_history(&self, reply: Scripted<ChatHistoryResponse>) {
        self.history.lock().unwrap().push_back(reply);
    }

    pub fn push_send(&self, reply: Scripted<ChatResponse>) {
        self.sends.lock().unwrap().push_back(reply);
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    /// `(session_id, message)` pairs in the order they were sent.
    pub fn sent(&self) -> Vec<(Option<String>, String)> {
        self.sent_sessions.lock().unwrap().clone()
    }
}

async fn play<T>(scripted: Option<Scripted<T>>) -> Result<T, ApiError> {
    let Some(scripted) = scripted else {
        return Err(ApiError::Transport("no scripted reply".to_string()));
    };
    if let Some(gate) = scripted.gate {
        gate.notified().await;
    }
    scripted.result
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn fetch_history(&self, _session_id: &str) -> Result<ChatHistoryResponse, ApiError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.history.lock().unwrap().pop_front();
        self.started.notify_one();
        play(next).await
    }

    async fn send_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatResponse, ApiError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.sent_sessions
            .lock()
            .unwrap()
            .push((session_id.map(str::to_string), message.to_string()));
        let next = self.sends.lock().unwrap().pop_front();
        self.started.notify_one();
        play(next).await
    }
}

pub(crate) fn user(content: &str) -> ChatMessage {
    ChatMessage::new(MessageRole::User, content)
}

pub(crate) fn assistant(content: &str) -> ChatMessage {
    ChatMessage::new(MessageRole::Assistant, content)
}

pub(crate) fn chat_response(session_id: &str, messages: Vec<ChatMessage>) -> ChatResponse {
    let reply = messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant)
        .map(|m| m.content.clone())
        .unwrap_or_default();
    ChatResponse {
        session_id: session_id.to_string(),
        reply,
        messages,
    }
}

pub(crate) fn history_response(session_id: &str, messages: Vec<ChatMessage>) -> ChatHistoryResponse {
    ChatHistoryResponse {
        session_id: session_id.to_string(),
        messages,
    }
}
