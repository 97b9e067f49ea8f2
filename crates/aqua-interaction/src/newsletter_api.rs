//! HttpNewsletterApi - REST implementation of the newsletter contract.

use crate::api_client::ApiClient;
use aqua_core::error::ApiError;
use aqua_core::newsletter::{NewsletterApi, NewsletterRequest, NewsletterResponse};
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub struct HttpNewsletterApi {
    client: ApiClient,
}

impl HttpNewsletterApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NewsletterApi for HttpNewsletterApi {
    async fn subscribe(
        &self,
        request: &NewsletterRequest,
    ) -> Result<Option<NewsletterResponse>, ApiError> {
        self.client.post_json("/newsletter", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqua_core::newsletter::{SubscribeOptions, SubscriptionStatus};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_subscribe_posts_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/newsletter"))
            .and(body_json(json!({
                "email": "jane@example.com",
                "source": "footer-newsletter",
                "metadata": {}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "subscribed"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpNewsletterApi::new(ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap());
        let request = NewsletterRequest::new("jane@example.com", SubscribeOptions::default());

        let response = api.subscribe(&request).await.unwrap();

        assert_eq!(
            response.map(|r| r.status),
            Some(SubscriptionStatus::Subscribed)
        );
    }

    #[tokio::test]
    async fn test_no_content_counts_as_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/newsletter"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpNewsletterApi::new(ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap());
        let request = NewsletterRequest::new("jane@example.com", SubscribeOptions::default());

        let response = api.subscribe(&request).await;

        assert_eq!(response, Ok(None));
    }

    #[tokio::test]
    async fn test_conflict_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/newsletter"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"message": "Already subscribed"})),
            )
            .mount(&server)
            .await;

        let api = HttpNewsletterApi::new(ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap());
        let request = NewsletterRequest::new("jane@example.com", SubscribeOptions::default());

        let err = api.subscribe(&request).await.unwrap_err();

        assert_eq!(err.user_message(), "Already subscribed");
    }
}
