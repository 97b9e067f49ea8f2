//! Chat widget use cases.
//!
//! [`ChatWidget`] is the entry point for UI code. It composes the
//! [`RequestCoordinator`] (sends) and the [`HistoryRestorer`] (resumed
//! transcripts) over one shared widget state, and exposes open/close through
//! an injected [`WidgetVisibility`] handle.

pub mod coordinator;
pub mod newsletter_service;
pub mod request;
pub mod restorer;
mod session_writer;
mod state;
pub mod visibility;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use coordinator::{RequestCoordinator, SendSuccess};
pub use newsletter_service::NewsletterService;
pub use request::{RequestHandle, RequestKind, RequestOutcome};
pub use restorer::{HistoryRestorer, RestoreOutcome};
pub use visibility::WidgetVisibility;
pub use widget::{ChatWidget, WidgetSnapshot};
