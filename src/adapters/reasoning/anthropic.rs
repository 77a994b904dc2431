//! Anthropic Messages API reasoning adapter.
//!
//! Structured requests are answered through a client tool named
//! `submit_<schema>` whose input schema is the response schema. Without
//! grounding the model is forced to call that tool. With grounding the
//! web search server tool is offered as well and the model picks, so a
//! JSON answer written as text is also accepted.
//!
//! A grounded turn the API pauses (`pause_turn`) is continued by sending
//! the partial assistant content back, up to [`MAX_PAUSE_CONTINUATIONS`]
//! times.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{IntegrationError, IntegrationResult};
use crate::domain::models::{LlmConfig, ReasoningOutput, ReasoningRequest, ResponseSchema};
use crate::domain::ports::ReasoningService;
use crate::infrastructure::claude::types::{
    Message, MessageRequest, MessageResponse, StopReason, Tool, ToolChoice,
};
use crate::infrastructure::claude::ClaudeClient;

/// Follow-up requests allowed for one paused server-tool turn
pub const MAX_PAUSE_CONTINUATIONS: usize = 3;

/// Per-request generation settings
#[derive(Debug, Clone)]
pub struct AnthropicReasoningConfig {
    /// Model identifier
    pub model: String,
    /// Output token cap per request
    pub max_tokens: u32,
    /// Sampling temperature, API default when `None`
    pub temperature: Option<f32>,
    /// Searches allowed per grounded request
    pub web_search_max_uses: u32,
}

impl From<&LlmConfig> for AnthropicReasoningConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            web_search_max_uses: config.web_search_max_uses,
        }
    }
}

/// [`ReasoningService`] backed by the Anthropic Messages API.
pub struct AnthropicReasoningService {
    client: Arc<ClaudeClient>,
    config: AnthropicReasoningConfig,
}

impl AnthropicReasoningService {
    /// Service sending every request through `client`.
    pub fn new(client: Arc<ClaudeClient>, config: AnthropicReasoningConfig) -> Self {
        Self { client, config }
    }

    fn submit_tool_name(schema: &ResponseSchema) -> String {
        format!("submit_{}", schema.name)
    }

    fn build_request(&self, request: &ReasoningRequest) -> MessageRequest {
        let mut message = MessageRequest::simple_message(
            self.config.model.clone(),
            request.prompt.clone(),
            self.config.max_tokens,
        );
        message.temperature = self.config.temperature;

        let mut tools = Vec::new();
        if request.ground_in_internet {
            tools.push(Tool::web_search(self.config.web_search_max_uses));
        }

        if let Some(schema) = &request.response_schema {
            let tool_name = Self::submit_tool_name(schema);
            message.system = Some(format!(
                "Deliver your final answer by calling the `{tool_name}` tool exactly once."
            ));
            tools.push(Tool::Custom {
                name: tool_name.clone(),
                description: schema.description.clone(),
                input_schema: schema.schema.clone(),
            });
            message.tool_choice = Some(if request.ground_in_internet {
                ToolChoice::Auto
            } else {
                ToolChoice::Tool { name: tool_name }
            });
        }

        if !tools.is_empty() {
            message.tools = Some(tools);
        }
        message
    }

    fn structured_output(
        response: &MessageResponse,
        schema: &ResponseSchema,
    ) -> IntegrationResult<serde_json::Value> {
        if let Some(input) = response.tool_input(&Self::submit_tool_name(schema)) {
            return Ok(input.clone());
        }

        if response.stop_reason == Some(StopReason::Refusal) {
            return Err(IntegrationError::malformed(&schema.name, "model refused the request"));
        }

        let text = response.text();
        debug!(schema = %schema.name, "no tool call, parsing JSON from text");
        serde_json::from_str(&extract_json(&text)).map_err(|e| {
            IntegrationError::malformed(&schema.name, format!("no tool call and no JSON object in text: {e}"))
        })
    }
}

/// Slice the outermost `{...}` out of a free-text answer.
fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return trimmed.to_string();
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

#[async_trait]
impl ReasoningService for AnthropicReasoningService {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    #[instrument(
        skip(self, request),
        fields(schema = request.schema_name().unwrap_or("text"), grounded = request.ground_in_internet)
    )]
    async fn invoke(&self, request: &ReasoningRequest) -> IntegrationResult<ReasoningOutput> {
        let mut message = self.build_request(request);
        let mut response = self.client.send_message(&message).await?;

        let mut continuations = 0;
        while response.stop_reason == Some(StopReason::PauseTurn) {
            if continuations == MAX_PAUSE_CONTINUATIONS {
                warn!(continuations, "turn still paused, giving up");
                break;
            }
            continuations += 1;
            debug!(continuations, "server tool turn paused, continuing");
            message
                .messages
                .push(Message::assistant(response.continuation_content()));
            response = self.client.send_message(&message).await?;
        }

        if response.stop_reason == Some(StopReason::MaxTokens) {
            warn!(max_tokens = self.config.max_tokens, "response truncated at max_tokens");
        }

        match &request.response_schema {
            Some(schema) => Self::structured_output(&response, schema).map(ReasoningOutput::Structured),
            None => Ok(ReasoningOutput::Text(response.text())),
        }
    }
}
