//! Chat domain module.
//!
//! # Module Structure
//!
//! - `message`: Transcript message types (`MessageRole`, `ChatMessage`)
//! - `conversation`: The widget's in-memory transcript and its transitions
//! - `api`: Remote chat contract (`ChatApi`) and its wire types

mod api;
mod conversation;
mod message;

pub use api::{ChatApi, ChatHistoryResponse, ChatRequest, ChatResponse};
pub use conversation::{Conversation, PendingId};
pub use message::{ChatMessage, MessageRole};
