//! In-memory transcript owned by a single widget instance.

use super::message::ChatMessage;
use crate::error::ChatError;

/// Ticket identifying one optimistic append.
///
/// Rollback matches on the ticket rather than on position or content, so a
/// late rollback from an older attempt cannot remove a newer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingId(u64);

#[derive(Debug, Clone)]
struct PendingEntry {
    id: PendingId,
    message: ChatMessage,
}

/// Ordered chat transcript with controlled transitions.
///
/// The transcript is the server's last authoritative list (or the restored
/// history) followed by at most one trailing optimistic message.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    confirmed: Vec<ChatMessage>,
    pending: Option<PendingEntry>,
    next_pending: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole transcript with restored history.
    pub fn restore(&mut self, messages: Vec<ChatMessage>) {
        self.confirmed = messages;
        self.pending = None;
    }

    /// Appends a message awaiting server confirmation.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::AlreadyPending` and leaves the transcript untouched
    /// if another optimistic message is still pending.
    pub fn append_optimistic(&mut self, message: ChatMessage) -> Result<PendingId, ChatError> {
        if self.pending.is_some() {
            return Err(ChatError::AlreadyPending);
        }

        self.next_pending += 1;
        let id = PendingId(self.next_pending);
        self.pending = Some(PendingEntry { id, message });
        Ok(id)
    }

    /// Replaces the transcript with the server's definitive list.
    ///
    /// The pending entry, if any, is superseded.
    pub fn reconcile(&mut self, authoritative: Vec<ChatMessage>) {
        self.confirmed = authoritative;
        self.pending = None;
    }

    /// Removes the pending message identified by `id`.
    ///
    /// Returns false if that entry is no longer present (already reconciled,
    /// reset, or replaced by a newer attempt).
    pub fn rollback(&mut self, id: PendingId) -> bool {
        match &self.pending {
            Some(entry) if entry.id == id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Clears the transcript entirely.
    pub fn reset(&mut self) {
        self.confirmed.clear();
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_message(&self) -> Option<&ChatMessage> {
        self.pending.as_ref().map(|entry| &entry.message)
    }

    /// Iterates messages in transcript order, pending entry last.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.confirmed
            .iter()
            .chain(self.pending.iter().map(|entry| &entry.message))
    }

    /// Owned copy of the transcript, pending entry last.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.confirmed.len() + usize::from(self.pending.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
