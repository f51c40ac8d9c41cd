//! Image backend request/response types.

use serde::{Deserialize, Serialize};

/// Body POSTed to the image-generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPayload {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg: f64,
    pub model_index: u32,
    pub seed: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

/// Response from the image-generation endpoint.
///
/// Only `success == Some(true)` counts as a generated image; `error` and
/// `message` carry the backend's explanation otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<GenerationData>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationData {
    #[serde(default)]
    pub image_url: Option<String>,
}

impl GenerationResponse {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    /// The backend's own explanation for a failure, `error` before `message`.
    pub fn failure_reason(&self) -> Option<&str> {
        self.error
            .as_deref()
            .filter(|e| !e.is_empty())
            .or_else(|| self.message.as_deref().filter(|m| !m.is_empty()))
    }

    pub fn image_url(&self) -> Option<&str> {
        self.data.as_ref()?.image_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omits_missing_negative_prompt() {
        let payload = GenerationPayload {
            prompt: "a lighthouse".to_string(),
            width: 2048,
            height: 1152,
            steps: 8,
            cfg: 7.0,
            model_index: 5,
            seed: 42,
            negative_prompt: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["steps"], 8);
        assert_eq!(json["model_index"], 5);
        assert!(json.get("negative_prompt").is_none());
    }

    #[test]
    fn test_response_success() {
        let json = r#"{"success": true, "data": {"image_url": "https://cdn/x.png"}}"#;
        let resp: GenerationResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.image_url(), Some("https://cdn/x.png"));
    }

    #[test]
    fn test_response_failure_reason_prefers_error() {
        let resp: GenerationResponse =
            serde_json::from_str(r#"{"success": false, "error": "quota", "message": "later"}"#).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.failure_reason(), Some("quota"));

        let resp: GenerationResponse = serde_json::from_str(r#"{"message": "busy"}"#).unwrap();
        assert_eq!(resp.failure_reason(), Some("busy"));
        assert!(resp.image_url().is_none());
    }
}
