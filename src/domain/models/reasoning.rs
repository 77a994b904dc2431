//! Request/response shapes for the external reasoning service.

use serde::{Deserialize, Serialize};

/// Named JSON schema the service must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Short identifier, e.g. `rule_flags`
    pub name: String,
    /// What the answer contains
    pub description: String,
    /// JSON schema of the answer
    pub schema: serde_json::Value,
}

/// One call to the reasoning service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningRequest {
    /// Full prompt text
    pub prompt: String,
    /// Let the service search the internet before answering.
    pub ground_in_internet: bool,
    /// Structured output contract. `None` means free text.
    pub response_schema: Option<ResponseSchema>,
}

impl ReasoningRequest {
    /// Schema-constrained request.
    pub fn structured(prompt: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            prompt: prompt.into(),
            ground_in_internet: false,
            response_schema: Some(schema),
        }
    }

    /// Free-text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ground_in_internet: false,
            response_schema: None,
        }
    }

    /// Allow internet search for this request.
    pub fn grounded(mut self) -> Self {
        self.ground_in_internet = true;
        self
    }

    /// Name of the response schema, if any.
    pub fn schema_name(&self) -> Option<&str> {
        self.response_schema.as_ref().map(|s| s.name.as_str())
    }
}

/// What the reasoning service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReasoningOutput {
    /// JSON answer to a schema-constrained request
    Structured(serde_json::Value),
    /// Free-text answer
    Text(String),
}
