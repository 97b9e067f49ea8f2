//! Request coordinator: single-flight sends.

use crate::request::{RequestHandle, RequestKind, RequestOutcome};
use crate::session_writer::SessionWriter;
use crate::state::{Generations, SharedState};
use aqua_core::chat::{ChatApi, ChatMessage};
use aqua_core::error::ChatError;
use std::sync::Arc;

/// Result of a send that reached the server and was reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSuccess {
    pub session_id: String,
    pub reply: String,
    pub messages: Vec<ChatMessage>,
}

/// Serializes "send" operations for one widget.
///
/// A send moves through `Idle → Pending → {Succeeded | Failed | Cancelled}
/// → Idle`. The optimistic message is appended before the request is issued
/// and is either superseded by the server's transcript or rolled back.
pub struct RequestCoordinator {
    api: Arc<dyn ChatApi>,
    writer: SessionWriter,
    state: SharedState,
    generations: Generations,
}

impl RequestCoordinator {
    pub(crate) fn new(
        api: Arc<dyn ChatApi>,
        writer: SessionWriter,
        state: SharedState,
        generations: Generations,
    ) -> Self {
        Self {
            api,
            writer,
            state,
            generations,
        }
    }

    /// Sends `text` on `session_id` (or starts a new session when absent).
    ///
    /// # Errors
    ///
    /// - `EmptyInput`: `text` is blank. Nothing happens.
    /// - `AlreadyPending`: another send is pending. Nothing happens.
    /// - `Cancelled`: reset or torn down while in flight. The optimistic
    ///   message is rolled back (except after teardown) and no error is shown.
    /// - `RequestFailed`: the server or network failed. The optimistic
    ///   message is rolled back and the error is shown.
    pub async fn send(
        &self,
        session_id: Option<String>,
        text: &str,
    ) -> Result<SendSuccess, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let (handle, pending_id) = {
            let mut state = self.state.lock().await;
            if state.torn_down {
                return Err(ChatError::Cancelled);
            }
            if state.conversation.has_pending() {
                return Err(ChatError::AlreadyPending);
            }
            // A live send always has its optimistic entry; reset and teardown
            // take the handle when they drop or abandon that entry.
            debug_assert!(state.send.is_none());

            let pending_id = state
                .conversation
                .append_optimistic(ChatMessage::user_now(trimmed))?;
            let handle = RequestHandle::new(RequestKind::Send, self.generations.next());
            state.send = Some(handle.clone());
            state.error = None;
            (handle, pending_id)
        };

        tracing::debug!(
            "[RequestCoordinator] Issuing send #{} (session: {})",
            handle.generation(),
            session_id.as_deref().unwrap_or("new")
        );

        let outcome = handle
            .run(self.api.send_message(session_id.as_deref(), trimmed))
            .await;

        let mut state = self.state.lock().await;
        if state.torn_down {
            return Err(ChatError::Cancelled);
        }
        let current = state.is_current_send(&handle);

        let response = match outcome {
            RequestOutcome::Succeeded(response) if current => response,
            RequestOutcome::Failed(err) if current => {
                state.send = None;
                state.conversation.rollback(pending_id);
                let error = ChatError::request_failed(err.user_message());
                tracing::warn!(
                    "[RequestCoordinator] Send #{} failed: {}",
                    handle.generation(),
                    err
                );
                state.error = error.user_message();
                return Err(error);
            }
            _ => {
                if current {
                    state.send = None;
                }
                state.conversation.rollback(pending_id);
                tracing::debug!(
                    "[RequestCoordinator] Send #{} cancelled",
                    handle.generation()
                );
                return Err(ChatError::Cancelled);
            }
        };

        // The session id is durable before the transcript changes. The write
        // runs without the state lock; the ticket orders it before any reset
        // that follows.
        let ticket = self.writer.ticket().await;
        drop(state);
        if let Err(e) = self.writer.set(ticket, response.session_id.clone()).await {
            tracing::warn!(
                "[RequestCoordinator] Failed to persist session {}: {}",
                response.session_id,
                e
            );
        }

        let mut state = self.state.lock().await;
        if state.torn_down {
            return Err(ChatError::Cancelled);
        }
        if !state.is_current_send(&handle) {
            state.conversation.rollback(pending_id);
            tracing::debug!(
                "[RequestCoordinator] Send #{} reset while persisting",
                handle.generation()
            );
            return Err(ChatError::Cancelled);
        }

        state.send = None;
        state.conversation.reconcile(response.messages.clone());
        state.restore.attempted = true;
        state.error = None;

        tracing::info!(
            "[RequestCoordinator] Send #{} reconciled on session {} ({} messages)",
            handle.generation(),
            response.session_id,
            response.messages.len()
        );

        Ok(SendSuccess {
            session_id: response.session_id,
            reply: response.reply,
            messages: response.messages,
        })
    }

    /// Aborts outstanding send and history requests for teardown.
    ///
    /// Conversation state is left exactly as it is, and late results are
    /// discarded.
    pub async fn cancel_all(&self) {
        let mut state = self.state.lock().await;
        state.torn_down = true;
        state.cancel_outstanding();
        tracing::debug!("[RequestCoordinator] Cancelled all outstanding requests");
    }

    /// True while a send is outstanding.
    pub async fn is_sending(&self) -> bool {
        self.state.lock().await.is_sending()
    }
}
