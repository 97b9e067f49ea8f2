//! ChatWidget - the controller UI code drives.
//!
//! Owns the shared widget state and the session store, and wires them into a
//! [`RequestCoordinator`] and a [`HistoryRestorer`]. Rendering layers only
//! read [`WidgetSnapshot`]s and call the operations below.

use crate::coordinator::{RequestCoordinator, SendSuccess};
use crate::restorer::{HistoryRestorer, RestoreOutcome};
use crate::session_writer::SessionWriter;
use crate::state::{Generations, SharedState, WidgetState};
use crate::visibility::WidgetVisibility;
use aqua_core::brand::Brand;
use aqua_core::chat::{ChatApi, ChatMessage, MessageRole};
use aqua_core::error::ChatError;
use aqua_core::session::SessionStore;
use std::sync::Arc;

/// Point-in-time view of everything the widget renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub messages: Vec<ChatMessage>,
    pub session_id: Option<String>,
    pub error: Option<String>,
    pub is_sending: bool,
    pub is_loading_history: bool,
    pub is_open: bool,
    /// Reset is offered once there is something to reset and no send is pending.
    pub can_reset: bool,
}

pub struct ChatWidget {
    brand: Brand,
    store: Arc<dyn SessionStore>,
    writer: SessionWriter,
    state: SharedState,
    visibility: WidgetVisibility,
    coordinator: RequestCoordinator,
    restorer: HistoryRestorer,
}

impl ChatWidget {
    pub fn new(
        brand: Brand,
        api: Arc<dyn ChatApi>,
        store: Arc<dyn SessionStore>,
        visibility: WidgetVisibility,
    ) -> Self {
        let state = WidgetState::shared();
        let generations = Generations::default();
        let writer = SessionWriter::new(store.clone());
        let coordinator = RequestCoordinator::new(
            api.clone(),
            writer.clone(),
            state.clone(),
            generations.clone(),
        );
        let restorer = HistoryRestorer::new(api, state.clone(), generations);

        Self {
            brand,
            store,
            writer,
            state,
            visibility,
            coordinator,
            restorer,
        }
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    pub fn visibility(&self) -> &WidgetVisibility {
        &self.visibility
    }

    /// Opens the panel and restores the stored session's transcript.
    pub async fn open(&self) -> Result<RestoreOutcome, ChatError> {
        self.visibility.open();
        self.activate().await
    }

    pub fn close(&self) {
        self.visibility.close();
    }

    pub async fn toggle(&self) -> Result<RestoreOutcome, ChatError> {
        if self.visibility.toggle() {
            self.activate().await
        } else {
            Ok(RestoreOutcome::Skipped)
        }
    }

    /// Runs the restore path if the panel is open.
    pub async fn activate(&self) -> Result<RestoreOutcome, ChatError> {
        if !self.visibility.is_open() {
            return Ok(RestoreOutcome::Skipped);
        }
        self.restorer.activate(self.store.get()).await
    }

    /// Sends the composer draft on the stored session.
    pub async fn submit(&self, draft: &str) -> Result<SendSuccess, ChatError> {
        self.coordinator.send(self.store.get(), draft).await
    }

    /// Starts a fresh conversation.
    ///
    /// Outstanding requests are cancelled, the stored session is cleared and
    /// the restore guard is re-armed.
    pub async fn reset(&self) {
        let ticket = {
            let mut state = self.state.lock().await;
            state.cancel_outstanding();
            state.conversation.reset();
            state.error = None;
            state.restore.rearm();
            self.writer.ticket().await
        };

        if let Err(e) = self.writer.clear(ticket).await {
            tracing::warn!("[ChatWidget] Failed to clear stored session: {}", e);
        }
        tracing::info!("[ChatWidget] Conversation reset");
    }

    /// Aborts outstanding work without touching state. Call on unmount.
    pub async fn teardown(&self) {
        self.coordinator.cancel_all().await;
    }

    pub async fn snapshot(&self) -> WidgetSnapshot {
        let state = self.state.lock().await;
        let session_id = self.store.get();
        let messages = state.conversation.messages();
        let is_sending = state.is_sending();

        WidgetSnapshot {
            can_reset: !is_sending && (!messages.is_empty() || session_id.is_some()),
            messages,
            session_id,
            error: state.error.clone(),
            is_sending,
            is_loading_history: state.restore.loading,
            is_open: self.visibility.is_open(),
        }
    }

    pub fn role_label(&self, role: MessageRole) -> &'static str {
        self.brand.role_label(role)
    }
}
