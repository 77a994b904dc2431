//! Scripted reasoning service.
//!
//! Replays queued outputs in order and records every request it receives.
//! Used by tests and offline demos; an exhausted script fails the call.
//! A poisoned lock means a test already panicked mid-call, so every
//! accessor panics on it too.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::errors::{IntegrationError, IntegrationResult};
use crate::domain::models::{ReasoningOutput, ReasoningRequest};
use crate::domain::ports::ReasoningService;

/// Reasoning backend that answers from a queue.
#[derive(Debug, Default)]
pub struct ScriptedReasoningService {
    script: Mutex<VecDeque<IntegrationResult<ReasoningOutput>>>,
    requests: Mutex<Vec<ReasoningRequest>>,
}

impl ScriptedReasoningService {
    /// Service with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a structured answer.
    pub fn push_structured(&self, value: serde_json::Value) {
        self.push(Ok(ReasoningOutput::Structured(value)));
    }

    /// Queue a free-text answer.
    pub fn push_text(&self, text: &str) {
        self.push(Ok(ReasoningOutput::Text(text.to_string())));
    }

    /// Queue a failed call.
    pub fn push_failure(&self, error: IntegrationError) {
        self.push(Err(error));
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<ReasoningRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    /// Outputs not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().expect("script lock poisoned").len()
    }

    fn push(&self, entry: IntegrationResult<ReasoningOutput>) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(entry);
    }
}

#[async_trait]
impl ReasoningService for ScriptedReasoningService {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn invoke(&self, request: &ReasoningRequest) -> IntegrationResult<ReasoningOutput> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request.clone());

        let next = self.script.lock().expect("script lock poisoned").pop_front();

        next.unwrap_or_else(|| {
            Err(IntegrationError::Request(
                "scripted reasoning service has no response queued".to_string(),
            ))
        })
    }
}
