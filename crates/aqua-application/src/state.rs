//! State shared by the coordinator, the restorer and the widget.
//!
//! The lock is never held across a network call; every transition between
//! suspension points happens inside one critical section.

use crate::request::RequestHandle;
use aqua_core::chat::Conversation;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

pub(crate) type SharedState = Arc<Mutex<WidgetState>>;

/// "Has a restore been attempted for the current session?"
#[derive(Debug, Default)]
pub(crate) struct RestoreGuard {
    pub attempted: bool,
    pub loading: bool,
}

impl RestoreGuard {
    pub fn rearm(&mut self) {
        self.attempted = false;
        self.loading = false;
    }
}

#[derive(Debug, Default)]
pub(crate) struct WidgetState {
    pub conversation: Conversation,
    pub error: Option<String>,
    pub restore: RestoreGuard,
    pub send: Option<RequestHandle>,
    pub history: Option<RequestHandle>,
    pub torn_down: bool,
}

impl WidgetState {
    pub fn shared() -> SharedState {
        Arc::new(Mutex::new(Self::default()))
    }

    /// Cancels and forgets every outstanding handle.
    pub fn cancel_outstanding(&mut self) {
        if let Some(handle) = self.send.take() {
            handle.cancel();
        }
        if let Some(handle) = self.history.take() {
            handle.cancel();
            self.restore.loading = false;
        }
    }

    /// True while a send handle is live. An entry orphaned by teardown does
    /// not count.
    pub fn is_sending(&self) -> bool {
        self.send.is_some()
    }

    /// True if `handle` is still the live send and has not been cancelled.
    pub fn is_current_send(&self, handle: &RequestHandle) -> bool {
        self.send.as_ref().is_some_and(|h| h.same_request(handle)) && !handle.is_cancelled()
    }

    pub fn is_current_history(&self, handle: &RequestHandle) -> bool {
        self.history.as_ref().is_some_and(|h| h.same_request(handle)) && !handle.is_cancelled()
    }
}

/// Monotonic source of request generations, shared by one widget's components.
#[derive(Debug, Clone, Default)]
pub(crate) struct Generations(Arc<AtomicU64>);

impl Generations {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}
