//! Chat-completions shapes used to talk to the prompt enhancement model.

use serde::{Deserialize, Serialize};

/// Request sent to an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmChatRequest {
    pub model: String,
    pub messages: Vec<LlmMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: String,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The subset of a chat-completions response the enhancer reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmChatResponse {
    #[serde(default)]
    pub choices: Vec<LlmChoice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmChoice {
    #[serde(default)]
    pub message: LlmResponseMessage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl LlmChatResponse {
    /// Text of the first choice, if any and non-empty.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .content
            .as_deref()
            .filter(|c| !c.is_empty())
    }
}
