//! Domain errors for the idea evaluator.

use thiserror::Error;
use uuid::Uuid;

/// Failure of an external capability (reasoning service or persistence).
///
/// This is the only failure kind the analysis pipeline produces. The pipeline
/// aborts on it; the advisory responder converts it into a fallback message.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// Transport failure or an exhausted retry budget
    #[error("Reasoning request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("Reasoning service returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Answer missing or not matching the requested schema
    #[error("Malformed '{schema}' response: {reason}")]
    MalformedResponse {
        /// Schema that was requested
        schema: String,
        /// What was wrong with the answer
        reason: String,
    },

    /// Storage failure
    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl IntegrationError {
    /// Shorthand for [`IntegrationError::MalformedResponse`].
    pub fn malformed(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            schema: schema.into(),
            reason: reason.into(),
        }
    }
}

/// Result of an external call.
pub type IntegrationResult<T> = Result<T, IntegrationError>;

/// Errors surfaced through the session and CLI.
#[derive(Debug, Error)]
pub enum DomainError {
    /// External capability failed
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    /// Caller passed unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No saved analysis with this ID
    #[error("Analysis not found: {0}")]
    AnalysisNotFound(Uuid),
}

/// Result of a session or CLI-facing operation.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for IntegrationError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::Integration(err.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Integration(IntegrationError::Persistence(format!(
            "serialization error: {err}"
        )))
    }
}
