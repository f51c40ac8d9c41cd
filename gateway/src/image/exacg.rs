//! Client for the sd.exacg.cc image-generation API.

use async_trait::async_trait;
use reqwest::Client;
use zimage_common::{GenerationPayload, GenerationResponse};

use super::{GenerationError, ImageGenerator};
use crate::config::ImageConfig;

pub struct ExacgClient {
    http_client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl ExacgClient {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl ImageGenerator for ExacgClient {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationError> {
        tracing::debug!(
            width = payload.width,
            height = payload.height,
            seed = payload.seed,
            "Sending generation request to {}",
            self.endpoint
        );

        let mut request = self.http_client.post(&self.endpoint).json(payload);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        let body: Option<GenerationResponse> = match response.text().await {
            Ok(text) => serde_json::from_str(&text).ok(),
            Err(_) => None,
        };

        match body {
            Some(body) if status.is_success() && body.is_success() => body
                .image_url()
                .map(String::from)
                .ok_or_else(|| {
                    GenerationError::Upstream("Image generation returned no image_url".to_string())
                }),
            other => {
                let reason = other
                    .as_ref()
                    .and_then(GenerationResponse::failure_reason)
                    .map(String::from)
                    .unwrap_or_else(|| {
                        format!("Image generation failed with status {}", status.as_u16())
                    });
                Err(GenerationError::Upstream(reason))
            }
        }
    }
}
