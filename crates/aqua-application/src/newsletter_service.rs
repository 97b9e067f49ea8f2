//! Newsletter signup, independent of the chat session.

use aqua_core::newsletter::{
    NewsletterApi, NewsletterError, NewsletterRequest, NewsletterResponse, SubscribeOptions,
    validate_email,
};
use std::sync::Arc;

/// Footer newsletter signup.
pub struct NewsletterService {
    api: Arc<dyn NewsletterApi>,
}

impl NewsletterService {
    pub fn new(api: Arc<dyn NewsletterApi>) -> Self {
        Self { api }
    }

    /// Validates `email` and registers it.
    ///
    /// Invalid addresses are rejected before any request is made. A server
    /// that accepts without a body yields `Ok(None)`.
    pub async fn subscribe(
        &self,
        email: &str,
        options: SubscribeOptions,
    ) -> Result<Option<NewsletterResponse>, NewsletterError> {
        let email = validate_email(email)?;
        let request = NewsletterRequest::new(email, options);

        match self.api.subscribe(&request).await {
            Ok(response) => {
                tracing::info!("[NewsletterService] Subscribed via {}", request.source);
                Ok(response)
            }
            Err(e) => {
                tracing::warn!("[NewsletterService] Subscription failed: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqua_core::error::ApiError;
    use aqua_core::newsletter::SubscriptionStatus;
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        requests: Mutex<Vec<NewsletterRequest>>,
        fail_with: Option<ApiError>,
        no_content: bool,
    }

    #[async_trait]
    impl NewsletterApi for RecordingApi {
        async fn subscribe(
            &self,
            request: &NewsletterRequest,
        ) -> Result<Option<NewsletterResponse>, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None if self.no_content => Ok(None),
                None => Ok(Some(NewsletterResponse {
                    status: SubscriptionStatus::Subscribed,
                })),
            }
        }
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_network() {
        let api = Arc::new(RecordingApi::default());
        let service = NewsletterService::new(api.clone());

        for email in ["", "jane", "jane@example", "jane doe@example.com"] {
            assert_eq!(
                service.subscribe(email, SubscribeOptions::default()).await,
                Err(NewsletterError::InvalidEmail)
            );
        }
        assert!(api.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_applies_options() {
        let api = Arc::new(RecordingApi::default());
        let service = NewsletterService::new(api.clone());
        let mut metadata = Map::new();
        metadata.insert("page".to_string(), Value::String("/pumps".to_string()));

        let response = service
            .subscribe(
                "  jane@example.com ",
                SubscribeOptions::default()
                    .with_source("pricing-page")
                    .with_metadata(metadata.clone()),
            )
            .await
            .unwrap();

        assert_eq!(
            response.map(|r| r.status),
            Some(SubscriptionStatus::Subscribed)
        );
        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].email, "jane@example.com");
        assert_eq!(requests[0].source, "pricing-page");
        assert_eq!(requests[0].metadata, metadata);
    }

    #[tokio::test]
    async fn test_bodyless_acceptance_is_success() {
        let api = Arc::new(RecordingApi {
            no_content: true,
            ..Default::default()
        });
        let service = NewsletterService::new(api.clone());

        let response = service
            .subscribe("jane@example.com", SubscribeOptions::default())
            .await;

        assert_eq!(response, Ok(None));
        assert_eq!(api.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_wrapped() {
        let api = Arc::new(RecordingApi {
            fail_with: Some(ApiError::http(400, "Email already registered")),
            ..Default::default()
        });
        let service = NewsletterService::new(api);

        let err = service
            .subscribe("jane@example.com", SubscribeOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already registered");
    }
}
