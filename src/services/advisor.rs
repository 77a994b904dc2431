//! Advisory chat responder.
//!
//! Never fails: a reasoning error becomes the fallback reply so the
//! transcript always ends with an assistant message after a turn.

use std::sync::Arc;
use tracing::{instrument, warn};

use crate::domain::models::{AnalysisRecord, ChatMessage, ReasoningRequest, Transcript, ADVISOR_FALLBACK};
use crate::domain::ports::ReasoningService;
use crate::services::{prompts, structured::request_text};

/// Score-aware advisor answering questions about a finished analysis.
pub struct AdvisoryResponder {
    reasoning: Arc<dyn ReasoningService>,
}

impl AdvisoryResponder {
    /// Responder over `reasoning`.
    pub fn new(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self { reasoning }
    }

    /// Answer one founder message.
    ///
    /// Blank messages are ignored and return `None` with the transcript
    /// untouched. Otherwise the trimmed user message and exactly one reply
    /// are appended, and the reply is returned.
    #[instrument(skip_all, fields(score = record.success_score))]
    pub async fn respond(
        &self,
        record: &AnalysisRecord,
        transcript: &mut Transcript,
        message: &str,
    ) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let prompt = prompts::advisory(record, transcript, message);
        transcript.push(ChatMessage::user(message));

        let reply = match request_text(self.reasoning.as_ref(), &ReasoningRequest::text(prompt)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "advisory reply failed; using fallback");
                ADVISOR_FALLBACK.to_string()
            }
        };

        transcript.push(ChatMessage::assistant(reply.clone()));
        Some(reply)
    }
}
