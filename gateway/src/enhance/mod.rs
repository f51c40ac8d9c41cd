//! Prompt enhancement through an external chat model.
//!
//! Enhancement is optional and always recoverable: every failure is reported
//! as an [`EnhanceError`] value and the pipeline carries on with the user's
//! own prompt.

mod openai;
mod parse;
mod prompt;

pub use openai::OpenAiEnhancer;
pub use parse::{parse_enhancement, parse_llm_json, sanitize_llm_json};
pub use prompt::build_system_prompt;

use std::time::Duration;

use async_trait::async_trait;
use zimage_common::AspectRatio;

/// A rewritten prompt and the model's ratio suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhancement {
    pub prompt: String,
    /// Raw suggestion; only honoured later if it names a known ratio.
    pub aspect_ratio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnhanceError {
    #[error("enhancement API key not configured")]
    NotConfigured,

    #[error("enhancement timed out after {0:?}")]
    Timeout(Duration),

    #[error("LLM API returned {0}")]
    Status(u16),

    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("No content in LLM response")]
    EmptyContent,

    #[error("LLM response is not valid JSON: {0}")]
    Parse(String),

    #[error("Invalid JSON structure from LLM: missing string \"prompt\"")]
    InvalidShape,
}

pub type EnhancementResult = std::result::Result<Enhancement, EnhanceError>;

/// Rewrites a user prompt into a richer English description.
#[async_trait]
pub trait PromptEnhancer: Send + Sync {
    /// `user_ratio` is the ratio the user already asked for, if any; the model
    /// is then told not to suggest one.
    async fn enhance(&self, prompt: &str, user_ratio: Option<AspectRatio>) -> EnhancementResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_keeps_sub_second_precision() {
        let err = EnhanceError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "enhancement timed out after 250ms");
        assert_eq!(
            EnhanceError::Timeout(Duration::from_secs(10)).to_string(),
            "enhancement timed out after 10s"
        );
    }
}
