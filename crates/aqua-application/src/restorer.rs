//! History restorer: loads a previous transcript at most once per session.

use crate::request::{RequestHandle, RequestKind, RequestOutcome};
use crate::state::{Generations, SharedState};
use aqua_core::chat::ChatApi;
use aqua_core::error::ChatError;
use std::sync::Arc;

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// No fetch was issued (no session, already attempted, in flight, or the
    /// conversation already has messages).
    Skipped,
    /// The transcript was loaded and applied.
    Restored { count: usize },
}

pub struct HistoryRestorer {
    api: Arc<dyn ChatApi>,
    state: SharedState,
    generations: Generations,
}

impl HistoryRestorer {
    pub(crate) fn new(api: Arc<dyn ChatApi>, state: SharedState, generations: Generations) -> Self {
        Self {
            api,
            state,
            generations,
        }
    }

    /// Restores the transcript for `session_id` when the widget becomes active.
    ///
    /// The guard is marked before the fetch is issued, so concurrent
    /// activations produce a single request. A failed restore is not retried
    /// until the guard is re-armed by a reset.
    pub async fn activate(&self, session_id: Option<String>) -> Result<RestoreOutcome, ChatError> {
        let Some(session_id) = session_id else {
            let mut state = self.state.lock().await;
            state.restore.rearm();
            return Ok(RestoreOutcome::Skipped);
        };

        let handle = {
            let mut state = self.state.lock().await;
            if state.torn_down
                || state.restore.attempted
                || state.restore.loading
                || !state.conversation.is_empty()
            {
                return Ok(RestoreOutcome::Skipped);
            }

            state.restore.attempted = true;
            state.restore.loading = true;
            let handle = RequestHandle::new(RequestKind::History, self.generations.next());
            state.history = Some(handle.clone());
            handle
        };

        tracing::debug!(
            "[HistoryRestorer] Fetching history #{} for session {}",
            handle.generation(),
            session_id
        );

        let outcome = handle.run(self.api.fetch_history(&session_id)).await;

        let mut state = self.state.lock().await;
        let current = state.is_current_history(&handle);
        if current {
            state.history = None;
            state.restore.loading = false;
        }
        if state.torn_down || !current {
            tracing::debug!(
                "[HistoryRestorer] History #{} discarded",
                handle.generation()
            );
            return Err(ChatError::Cancelled);
        }

        match outcome {
            RequestOutcome::Succeeded(history) => {
                if !state.conversation.is_empty() {
                    tracing::debug!(
                        "[HistoryRestorer] Conversation already populated; ignoring {} restored messages",
                        history.messages.len()
                    );
                    return Ok(RestoreOutcome::Skipped);
                }
                let count = history.messages.len();
                state.conversation.restore(history.messages);
                state.error = None;
                tracing::info!(
                    "[HistoryRestorer] Restored {} messages for session {}",
                    count,
                    session_id
                );
                Ok(RestoreOutcome::Restored { count })
            }
            RequestOutcome::Failed(err) => {
                tracing::warn!(
                    "[HistoryRestorer] Failed to load history for session {}: {}",
                    session_id,
                    err
                );
                let error = ChatError::history_load_failed(err.user_message());
                state.error = error.user_message();
                Err(error)
            }
            RequestOutcome::Cancelled => Err(ChatError::Cancelled),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.restore.loading
    }
}
