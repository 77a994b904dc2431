//! Reasoning service adapters.

pub mod anthropic;
pub mod scripted;

pub use anthropic::{AnthropicReasoningConfig, AnthropicReasoningService};
pub use scripted::ScriptedReasoningService;
