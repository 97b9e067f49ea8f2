//! Error types for the Aqua chat client.
//!
//! Each layer has its own enum: `ApiError` for the HTTP wrapper,
//! `StorageError` for persistence, and `ChatError` for the outcomes the
//! widget reports to UI code.

use thiserror::Error;

/// Fallback text when a send fails without a usable message.
pub const SEND_FAILED_MESSAGE: &str = "Unable to send message";

/// Fallback text when a history restore fails without a usable message.
pub const HISTORY_FAILED_MESSAGE: &str = "Unable to load chat history";

/// Fallback text for a non-2xx response with no readable body.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Outcome taxonomy for widget operations.
///
/// Network errors are translated into one of these at the coordinator and
/// restorer boundary; they never reach UI code as `ApiError`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The draft was empty after trimming. No network call was made.
    #[error("Message is empty")]
    EmptyInput,

    /// A send is already pending for this conversation.
    #[error("A message is already being sent")]
    AlreadyPending,

    /// The request was superseded or aborted by teardown.
    #[error("Request cancelled")]
    Cancelled,

    /// The send failed at the network or server.
    #[error("{0}")]
    RequestFailed(String),

    /// Restoring a previous transcript failed.
    #[error("{0}")]
    HistoryLoadFailed(String),
}

impl ChatError {
    /// Creates a RequestFailed error, substituting the fallback for blank text.
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed(non_blank_or(message.into(), SEND_FAILED_MESSAGE))
    }

    /// Creates a HistoryLoadFailed error, substituting the fallback for blank text.
    pub fn history_load_failed(message: impl Into<String>) -> Self {
        Self::HistoryLoadFailed(non_blank_or(message.into(), HISTORY_FAILED_MESSAGE))
    }

    /// True for outcomes that must not produce a user-visible message.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::AlreadyPending | Self::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The text the widget shows inline, if any.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::RequestFailed(message) | Self::HistoryLoadFailed(message) => {
                Some(message.clone())
            }
            _ => None,
        }
    }
}

fn non_blank_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Errors produced by the HTTP request wrapper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, connect, reset...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The client-wide timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A body was required but the server sent `204 No Content`.
    #[error("Empty response")]
    EmptyResponse,
}

impl ApiError {
    /// Creates an Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// The message shown to users for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Errors from the persistence layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// File locking error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StorageError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StorageError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for StorageError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, StorageError>`.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_kinds() {
        assert!(ChatError::EmptyInput.is_silent());
        assert!(ChatError::AlreadyPending.is_silent());
        assert!(ChatError::Cancelled.is_silent());
        assert!(!ChatError::request_failed("boom").is_silent());
        assert!(!ChatError::history_load_failed("boom").is_silent());
    }

    #[test]
    fn test_blank_messages_use_fallbacks() {
        assert_eq!(
            ChatError::request_failed("  "),
            ChatError::RequestFailed(SEND_FAILED_MESSAGE.to_string())
        );
        assert_eq!(
            ChatError::history_load_failed(""),
            ChatError::HistoryLoadFailed(HISTORY_FAILED_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_user_message_only_for_visible_errors() {
        assert_eq!(ChatError::Cancelled.user_message(), None);
        assert_eq!(
            ChatError::request_failed("Server down").user_message(),
            Some("Server down".to_string())
        );
    }

    #[test]
    fn test_http_error_displays_server_message() {
        let err = ApiError::http(502, "Unable to persist chat messages");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.user_message(), "Unable to persist chat messages");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
