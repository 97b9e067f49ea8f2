//! HTTP clients for the chat and newsletter endpoints.
//!
//! Both clients share [`ApiClient`], which owns the base URL, the timeout
//! policy and the error-body conventions of the backend.

pub mod api_client;
pub mod chat_api;
pub mod newsletter_api;

pub use api_client::ApiClient;
pub use chat_api::HttpChatApi;
pub use newsletter_api::HttpNewsletterApi;
