//! Session store trait.
//!
//! Defines the interface for persisting the widget's session identifier.

use crate::error::Result;

/// Durable mapping from a fixed namespaced key to the current session id.
///
/// Methods are synchronous: a mutation must be persisted before any fetch
/// that depends on it is issued, so a reload resumes the right thread.
///
/// # Implementation Notes
///
/// - `get` never fails. Unreadable storage is reported as "no session".
/// - `set` and `clear` update the in-memory view even when the durable write
///   fails; the error is returned so the caller can log it.
pub trait SessionStore: Send + Sync {
    /// The storage key, e.g. `aquapump.chat.session`.
    fn key(&self) -> &str;

    /// Returns the stored identifier, or `None` if absent or unreadable.
    fn get(&self) -> Option<String>;

    /// Persists `session_id` under the store's key.
    fn set(&self, session_id: &str) -> Result<()>;

    /// Removes the stored entry.
    fn clear(&self) -> Result<()>;
}
