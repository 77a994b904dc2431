//! Typed wrappers over the reasoning port.

use serde::de::DeserializeOwned;

use crate::domain::errors::{IntegrationError, IntegrationResult};
use crate::domain::models::{ReasoningOutput, ReasoningRequest};
use crate::domain::ports::ReasoningService;

/// Issue a schema-constrained request and deserialize the result.
///
/// Shape violations (missing fields, unknown enum values, wrong types) are
/// reported as `MalformedResponse` against the request's schema name.
pub async fn request_structured<T: DeserializeOwned>(
    reasoning: &dyn ReasoningService,
    request: &ReasoningRequest,
) -> IntegrationResult<T> {
    let schema = request.schema_name().unwrap_or("unnamed").to_string();

    match reasoning.invoke(request).await? {
        ReasoningOutput::Structured(value) => serde_json::from_value(value)
            .map_err(|e| IntegrationError::malformed(schema, e.to_string())),
        ReasoningOutput::Text(text) => Err(IntegrationError::malformed(
            schema,
            format!("expected structured output, got text ({} chars)", text.len()),
        )),
    }
}

/// Issue a free-text request.
pub async fn request_text(
    reasoning: &dyn ReasoningService,
    request: &ReasoningRequest,
) -> IntegrationResult<String> {
    match reasoning.invoke(request).await? {
        ReasoningOutput::Text(text) if !text.trim().is_empty() => Ok(text),
        ReasoningOutput::Text(_) => Err(IntegrationError::malformed("text", "empty response")),
        ReasoningOutput::Structured(_) => Err(IntegrationError::malformed(
            "text",
            "expected free text, got structured output",
        )),
    }
}
