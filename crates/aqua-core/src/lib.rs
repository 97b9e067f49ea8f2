//! Domain types for the Aqua chat widget client.
//!
//! This crate holds everything the other layers agree on: chat messages and
//! the in-memory conversation, the session store and remote API traits, brand
//! and configuration models, and the error taxonomy.

pub mod brand;
pub mod chat;
pub mod config;
pub mod error;
pub mod newsletter;
pub mod session;

// Re-export common types
pub use brand::Brand;
pub use chat::{ChatApi, ChatMessage, Conversation, MessageRole, PendingId};
pub use config::WidgetConfig;
pub use error::{ApiError, ChatError, StorageError};
pub use session::SessionStore;
