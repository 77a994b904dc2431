//! Request and response types for the Anthropic Messages API

use serde::{Deserialize, Serialize};

/// Message request to send to the Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Model identifier
    pub model: String,

    /// Array of messages in the conversation
    pub messages: Vec<Message>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// System prompt (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Temperature for sampling (0.0-1.0, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Tool definitions (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,

    /// How the model may pick tools (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl MessageRequest {
    /// Single user turn with no tools.
    pub fn simple_message(model: String, prompt: String, max_tokens: u32) -> Self {
        Self {
            model,
            messages: vec![Message::user(prompt)],
            max_tokens,
            system: None,
            temperature: None,
            tools: None,
            tool_choice: None,
        }
    }
}

/// A single message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: String,

    /// Content of the message (string or array of content blocks)
    pub content: MessageContent,
}

impl Message {
    /// User turn.
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Assistant turn, used to resume a paused response.
    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Message content can be either a simple string or an array of content blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Array of content blocks
    Blocks(Vec<ContentBlock>),
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<ContentBlock>> for MessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Content block in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Plain text
    #[serde(rename = "text")]
    Text {
        /// Generated text
        text: String,
        /// Search citations backing the text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        citations: Option<serde_json::Value>,
    },
    /// Call of a client tool
    #[serde(rename = "tool_use")]
    ToolUse {
        /// Tool call ID
        id: String,
        /// Tool name
        name: String,
        /// Arguments, shaped by the tool's input schema
        input: serde_json::Value,
    },
    /// Call of a server-side tool such as web search
    #[serde(rename = "server_tool_use")]
    ServerToolUse {
        /// Tool call ID
        id: String,
        /// Tool name
        name: String,
        /// Arguments, e.g. the search query
        input: serde_json::Value,
    },
    /// Results of a server-side web search, echoed back verbatim
    #[serde(rename = "web_search_tool_result")]
    WebSearchToolResult {
        /// ID of the matching `server_tool_use` block
        tool_use_id: String,
        /// Search results or an error object
        content: serde_json::Value,
    },
    /// Any block type this client does not model
    #[serde(other)]
    Other,
}

/// Tool definition offered to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tool {
    /// Client tool the model answers by calling with structured input
    Custom {
        /// Tool name
        name: String,
        /// What the tool is for
        description: String,
        /// JSON schema of the tool input
        input_schema: serde_json::Value,
    },
    /// Server-side tool executed by the API (e.g. web search)
    Server {
        /// Versioned tool type
        #[serde(rename = "type")]
        tool_type: String,
        /// Tool name
        name: String,
        /// Cap on calls within one request
        #[serde(skip_serializing_if = "Option::is_none")]
        max_uses: Option<u32>,
    },
}

/// Versioned type of the web search server tool
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

impl Tool {
    /// Web search server tool limited to `max_uses` searches.
    pub fn web_search(max_uses: u32) -> Self {
        Self::Server {
            tool_type: WEB_SEARCH_TOOL_TYPE.to_string(),
            name: "web_search".to_string(),
            max_uses: Some(max_uses),
        }
    }
}

/// Tool selection mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    /// Model decides whether to use tools
    Auto,
    /// Model must use some tool
    Any,
    /// Model must use the named tool
    Tool {
        /// Tool to call
        name: String,
    },
}

/// Response from the Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Unique message ID
    pub id: String,

    /// Array of content blocks in the response
    pub content: Vec<ContentBlock>,

    /// Model that generated the response
    pub model: String,

    /// Reason for stopping generation
    pub stop_reason: Option<StopReason>,

    /// Token usage statistics
    pub usage: Usage,
}

impl MessageResponse {
    /// Concatenated text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Content to send back as the assistant turn when continuing a
    /// paused response. Blocks this client cannot reproduce are dropped.
    pub fn continuation_content(&self) -> Vec<ContentBlock> {
        self.content
            .iter()
            .filter(|block| !matches!(block, ContentBlock::Other))
            .cloned()
            .collect()
    }

    /// Input of the first call to the named tool.
    pub fn tool_input(&self, tool_name: &str) -> Option<&serde_json::Value> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::ToolUse { name, input, .. } if name == tool_name => Some(input),
            _ => None,
        })
    }
}

/// Reason why message generation stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of turn
    EndTurn,
    /// Maximum tokens reached
    MaxTokens,
    /// Stop sequence encountered
    StopSequence,
    /// Tool use initiated
    ToolUse,
    /// Long server-tool turn paused by the API
    PauseTurn,
    /// Model declined to answer
    Refusal,
    /// Reason this client does not model
    #[serde(other)]
    Unknown,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Number of input tokens
    pub input_tokens: u32,

    /// Number of output tokens
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_request_serialization() {
        let mut request =
            MessageRequest::simple_message("claude-test".to_string(), "Hello".to_string(), 100);
        request.temperature = Some(0.5);

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("claude-test"));
        assert!(json.contains("Hello"));
        assert!(json.contains("0.5"));
        assert!(!json.contains("tool_choice"));
    }

    #[test]
    fn test_tools_serialize_by_kind() {
        let tools = vec![
            Tool::Custom {
                name: "submit_rule_flags".to_string(),
                description: "Submit".to_string(),
                input_schema: json!({ "type": "object" }),
            },
            Tool::web_search(5),
        ];
        let value = serde_json::to_value(&tools).unwrap();

        assert_eq!(value[0]["name"], "submit_rule_flags");
        assert!(value[0].get("type").is_none());
        assert_eq!(value[1]["type"], WEB_SEARCH_TOOL_TYPE);
        assert_eq!(value[1]["max_uses"], 5);
    }

    #[test]
    fn test_tool_choice_serialization() {
        let forced = ToolChoice::Tool {
            name: "submit_x".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&forced).unwrap(),
            json!({ "type": "tool", "name": "submit_x" })
        );
        assert_eq!(serde_json::to_value(ToolChoice::Auto).unwrap(), json!({ "type": "auto" }));
    }

    #[test]
    fn test_response_with_server_tool_blocks() {
        let response: MessageResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-test",
            "stop_reason": "tool_use",
            "content": [
                { "type": "server_tool_use", "id": "srv_1", "name": "web_search", "input": { "query": "dog walking market" } },
                { "type": "web_search_tool_result", "tool_use_id": "srv_1", "content": [] },
                { "type": "text", "text": "Found it.", "citations": [] },
                { "type": "tool_use", "id": "tu_1", "name": "submit_rule_flags", "input": { "ok": true } }
            ],
            "usage": { "input_tokens": 10, "output_tokens": 20 }
        }))
        .unwrap();

        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(response.text(), "Found it.");
        assert_eq!(response.tool_input("submit_rule_flags"), Some(&json!({ "ok": true })));
        assert!(response.tool_input("other").is_none());
    }

    #[test]
    fn test_continuation_content_echoes_server_blocks() {
        let response: MessageResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "model": "claude-test",
            "stop_reason": "pause_turn",
            "content": [
                { "type": "server_tool_use", "id": "srv_1", "name": "web_search", "input": { "query": "q" } },
                { "type": "web_search_tool_result", "tool_use_id": "srv_1", "content": [{ "type": "web_search_result", "url": "https://a.example", "encrypted_content": "abc" }] },
                { "type": "redacted_thinking", "data": "x" }
            ],
            "usage": { "input_tokens": 1, "output_tokens": 1 }
        }))
        .unwrap();

        assert_eq!(response.stop_reason, Some(StopReason::PauseTurn));
        let message = Message::assistant(response.continuation_content());
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["content"][0]["type"], "server_tool_use");
        assert_eq!(value["content"][1]["type"], "web_search_tool_result");
        assert_eq!(value["content"][1]["content"][0]["encrypted_content"], "abc");
    }
}
