//! Reasoning service port - interface for the hosted LLM.

use async_trait::async_trait;

use crate::domain::errors::IntegrationResult;
use crate::domain::models::{ReasoningOutput, ReasoningRequest};

/// External reasoning capability.
///
/// Implementations return `ReasoningOutput::Structured` when the request
/// carries a response schema and `ReasoningOutput::Text` otherwise. Any
/// transport or contract failure is an `IntegrationError`; callers decide
/// whether to abort or fall back.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &'static str;

    /// Issue one request and wait for its completion.
    async fn invoke(&self, request: &ReasoningRequest) -> IntegrationResult<ReasoningOutput>;
}
