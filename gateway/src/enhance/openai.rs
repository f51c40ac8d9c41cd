//! Enhancement through an OpenAI-compatible chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use zimage_common::{AspectRatio, LlmChatRequest, LlmChatResponse, LlmMessage};

use super::{build_system_prompt, parse_enhancement, EnhanceError, EnhancementResult, PromptEnhancer};
use crate::config::EnhanceConfig;

/// Prompt enhancer backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiEnhancer {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiEnhancer {
    pub fn new(config: &EnhanceConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn map_request_error(&self, e: reqwest::Error) -> EnhanceError {
        if e.is_timeout() {
            EnhanceError::Timeout(self.timeout)
        } else {
            EnhanceError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl PromptEnhancer for OpenAiEnhancer {
    async fn enhance(&self, prompt: &str, user_ratio: Option<AspectRatio>) -> EnhancementResult {
        let api_key = self.api_key.as_deref().ok_or(EnhanceError::NotConfigured)?;

        let request = LlmChatRequest {
            model: self.model.clone(),
            messages: vec![
                LlmMessage::system(build_system_prompt(user_ratio)),
                LlmMessage::user(prompt),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!("Sending enhancement request to {} (model {})", url, self.model);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(EnhanceError::Status(response.status().as_u16()));
        }

        let body: LlmChatResponse = response
            .json()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let content = body.first_content().ok_or(EnhanceError::EmptyContent)?;

        parse_enhancement(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let config = EnhanceConfig {
            base_url: "https://api.openai.com/v1/".to_string(),
            ..Default::default()
        };
        let enhancer = OpenAiEnhancer::new(&config);
        assert_eq!(enhancer.base_url, "https://api.openai.com/v1");
        assert_eq!(enhancer.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let config = EnhanceConfig {
            api_key: None,
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let enhancer = OpenAiEnhancer::new(&config);
        assert_eq!(enhancer.enhance("a cat", None).await, Err(EnhanceError::NotConfigured));
    }

    #[tokio::test]
    async fn test_empty_key_counts_as_missing() {
        let config = EnhanceConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        let enhancer = OpenAiEnhancer::new(&config);
        assert_eq!(enhancer.enhance("a cat", None).await, Err(EnhanceError::NotConfigured));
    }
}
