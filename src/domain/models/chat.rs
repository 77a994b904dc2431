//! Advisory chat transcript.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Greeting shown before the founder asks anything.
pub const ADVISOR_GREETING: &str = "I can help you improve your success odds! Try asking:
\u{2022} \"How do I raise my odds to 85%?\"
\u{2022} \"What pricing strategy works best?\"
\u{2022} \"Should I focus on marketing or product first?\"
\u{2022} \"What's my biggest risk?\"";

/// Reply appended when the reasoning service fails.
pub const ADVISOR_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The founder
    User,
    /// The advisor
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the turn
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Founder message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Advisor message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered conversation between founder and advisor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript opened with the advisor greeting.
    pub fn with_greeting() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(ADVISOR_GREETING)],
        }
    }

    /// Append a turn.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Turns, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Most recent turn.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// No turns yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Score band selecting the advisor's tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// 60 and above: optimise and scale.
    High,
    /// 30 up to 60: fix the main weaknesses.
    Moderate,
    /// Below 30: pivot, redesign or shut down.
    Low,
}

impl ScoreBand {
    /// Band for a success score.
    pub fn from_score(score: i64) -> Self {
        if score >= 60 {
            Self::High
        } else if score >= 30 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}
