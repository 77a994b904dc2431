//! Rate-limited, retrying HTTP client for the Messages API.

use super::errors::ClaudeApiError;
use super::rate_limiter::TokenBucketRateLimiter;
use super::retry::RetryPolicy;
use super::types::{MessageRequest, MessageResponse};
use reqwest::{header, Client as ReqwestClient, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::models::Config;
use crate::infrastructure::logging::redact_api_key;

/// Value of the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for the Messages API HTTP client
#[derive(Debug, Clone)]
pub struct ClaudeClientConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Base URL for the API
    pub base_url: String,

    /// Sustained rate limit in requests per second
    pub rate_limit_rps: f64,

    /// Requests allowed back-to-back before the rate limit applies
    pub burst_size: u32,

    /// Maximum retry attempts
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClaudeClientConfig {
    /// Client settings from the loaded configuration.
    pub fn from_config(config: &Config, api_key: String) -> Self {
        Self {
            api_key,
            base_url: config.llm.base_url.clone(),
            rate_limit_rps: config.rate_limit.requests_per_second,
            burst_size: config.rate_limit.burst_size,
            max_retries: config.retry.max_retries,
            initial_backoff_ms: config.retry.initial_backoff_ms,
            max_backoff_ms: config.retry.max_backoff_ms,
            timeout_secs: config.llm.timeout_secs,
        }
    }
}

/// HTTP client for the Anthropic Messages API
///
/// Provides:
/// - Connection pooling and reuse
/// - Rate limiting via token bucket algorithm
/// - Exponential backoff retry logic
/// - Compression support (gzip/brotli)
/// - Structured error handling
pub struct ClaudeClient {
    http_client: ReqwestClient,
    base_url: String,
    rate_limiter: Arc<TokenBucketRateLimiter>,
    retry_policy: RetryPolicy,
}

impl ClaudeClient {
    /// Build the HTTP client with auth headers, timeout, rate limiter and
    /// retry policy.
    pub fn new(config: ClaudeClientConfig) -> Result<Self, ClaudeApiError> {
        info!(
            "Initializing Claude API client: base_url={}, rate_limit={} rps, timeout={}s, api_key={}",
            config.base_url,
            config.rate_limit_rps,
            config.timeout_secs,
            redact_api_key(&config.api_key)
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| ClaudeApiError::InvalidRequest(format!("Invalid API key: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()?;

        let rate_limiter = Arc::new(TokenBucketRateLimiter::new(
            config.rate_limit_rps,
            config.burst_size,
        ));
        let retry_policy = RetryPolicy::new(
            config.max_retries,
            config.initial_backoff_ms,
            config.max_backoff_ms,
        );

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter,
            retry_policy,
        })
    }

    /// Send a message and wait for the complete response.
    #[instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens))]
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ClaudeApiError> {
        debug!("Sending message request");

        self.rate_limiter.acquire().await;

        let result = self
            .retry_policy
            .execute(|| async { self.execute_message_request(request).await })
            .await;

        match &result {
            Ok(response) => {
                info!(
                    "Message request succeeded: input_tokens={}, output_tokens={}",
                    response.usage.input_tokens, response.usage.output_tokens
                );
            }
            Err(err) => {
                error!("Message request failed: {}", err);
            }
        }

        result
    }

    async fn execute_message_request(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ClaudeApiError> {
        let url = format!("{}/v1/messages", self.base_url);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClaudeApiError::Timeout
                } else {
                    ClaudeApiError::NetworkError(e)
                }
            })?;

        Self::handle_response(response).await
    }

    async fn handle_response(response: Response) -> Result<MessageResponse, ClaudeApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!("API error ({}): {}", status, body);
            return Err(ClaudeApiError::from_status(status, body));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
