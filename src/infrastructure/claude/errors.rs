//! Messages API error classification.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::IntegrationError;

/// Errors that can occur when interacting with the Messages API
#[derive(Error, Debug)]
pub enum ClaudeApiError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or missing API key (HTTP 401)
    #[error("Invalid API key - authentication failed")]
    InvalidApiKey,

    /// Forbidden - permission denied (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error (HTTP 500, 502, 503, 504, 529)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Unknown or unexpected error
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl ClaudeApiError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest(body),
            StatusCode::UNAUTHORIZED => Self::InvalidApiKey,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::Timeout,
            status if status.is_server_error() || status.as_u16() == 529 => {
                Self::ServerError(status, body)
            }
            _ => Self::UnknownError(status, body),
        }
    }

    /// Returns true if this error is transient and should be retried
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::ServerError(_, _) | Self::Timeout | Self::NetworkError(_)
        )
    }

    /// Returns true if this is a permanent error that should not be retried
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::InvalidApiKey | Self::Forbidden(_) | Self::NotFound
        )
    }
}

impl From<ClaudeApiError> for IntegrationError {
    fn from(err: ClaudeApiError) -> Self {
        let status = match &err {
            ClaudeApiError::InvalidRequest(_) => Some(StatusCode::BAD_REQUEST),
            ClaudeApiError::InvalidApiKey => Some(StatusCode::UNAUTHORIZED),
            ClaudeApiError::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            ClaudeApiError::NotFound => Some(StatusCode::NOT_FOUND),
            ClaudeApiError::RateLimitExceeded => Some(StatusCode::TOO_MANY_REQUESTS),
            ClaudeApiError::ServerError(status, _) | ClaudeApiError::UnknownError(status, _) => {
                Some(*status)
            }
            ClaudeApiError::NetworkError(_) | ClaudeApiError::JsonError(_) | ClaudeApiError::Timeout => {
                None
            }
        };

        match status {
            Some(status) => Self::Status {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => Self::Request(err.to_string()),
        }
    }
}
