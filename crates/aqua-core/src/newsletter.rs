//! Newsletter subscription contract.
//!
//! Independent of the chat session: it only shares the HTTP wrapper.

use crate::error::ApiError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Source recorded when the caller does not provide one.
pub const DEFAULT_NEWSLETTER_SOURCE: &str = "footer-newsletter";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Body of `POST /newsletter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
    pub source: String,
    pub metadata: Map<String, Value>,
}

/// Subscription status reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Subscribed,
}

/// Response of `POST /newsletter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterResponse {
    pub status: SubscriptionStatus,
}

/// Optional fields for a subscription.
#[derive(Debug, Clone, Default)]
pub struct SubscribeOptions {
    pub source: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl SubscribeOptions {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl NewsletterRequest {
    /// Builds a request, filling in the default source and empty metadata.
    pub fn new(email: impl Into<String>, options: SubscribeOptions) -> Self {
        Self {
            email: email.into(),
            source: options
                .source
                .unwrap_or_else(|| DEFAULT_NEWSLETTER_SOURCE.to_string()),
            metadata: options.metadata.unwrap_or_default(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NewsletterError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error(transparent)]
    Request(#[from] ApiError),
}

/// Normalizes and validates an address before it reaches the network.
pub fn validate_email(email: &str) -> Result<String, NewsletterError> {
    let trimmed = email.trim();
    if EMAIL_PATTERN.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(NewsletterError::InvalidEmail)
    }
}

/// An abstract client for the newsletter endpoint.
#[async_trait]
pub trait NewsletterApi: Send + Sync {
    /// Registers the address.
    ///
    /// `Ok(None)` means the server accepted the request without a body
    /// (`204 No Content`).
    async fn subscribe(
        &self,
        request: &NewsletterRequest,
    ) -> Result<Option<NewsletterResponse>, ApiError>;
}
