//! Generic request wrapper shared by the chat and newsletter clients.

use aqua_core::config::{WidgetConfig, build_api_url};
use aqua_core::error::{ApiError, REQUEST_FAILED_MESSAGE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Thin reqwest wrapper that applies the backend's conventions.
///
/// - URLs are `api_base` + path.
/// - Every request carries the client-wide timeout.
/// - Non-2xx bodies are mined for `detail` or `message`, then raw text.
/// - `204 No Content` yields `None` without parsing.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    api_base: String,
}

impl ApiClient {
    /// Creates a client for `api_base` with the given request timeout.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Transport(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    pub fn from_config(config: &WidgetConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base.clone(), config.request_timeout())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn url(&self, path: &str) -> String {
        build_api_url(&self.api_base, path)
    }

    /// `GET path`, decoding the JSON body.
    pub async fn get<T>(&self, path: &str) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("[ApiClient] GET {}", url);
        self.execute(self.client.get(&url)).await
    }

    /// `POST path` with a JSON body, decoding the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("[ApiClient] POST {}", url);
        self.execute(self.client.post(&url).json(body)).await
    }

    async fn execute<T>(&self, request: RequestBuilder) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            tracing::warn!("[ApiClient] Request failed with {}: {}", status, message);
            return Err(ApiError::http(status.as_u16(), message));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Unwraps a body that the endpoint must always send.
pub fn require_body<T>(body: Option<T>) -> Result<T, ApiError> {
    body.ok_or(ApiError::EmptyResponse)
}

/// Picks the most useful message out of an error response body.
///
/// Order: JSON `detail`, JSON `message`, raw text, generic fallback.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for field in ["detail", "message"] {
            match map.get(field) {
                Some(Value::String(text)) if !text.trim().is_empty() => return text.clone(),
                Some(Value::Null) | Some(Value::String(_)) | None => {}
                Some(other) => return other.to_string(),
            }
        }
        return REQUEST_FAILED_MESSAGE.to_string();
    }

    let text = body.trim();
    if text.is_empty() {
        REQUEST_FAILED_MESSAGE.to_string()
    } else {
        text.to_string()
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_builder() {
        ApiError::InvalidUrl(err.to_string())
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}
