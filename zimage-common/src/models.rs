//! OpenAI-compatible model listing types.

use serde::{Deserialize, Serialize};

/// Model entry in the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelObject {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// Response from /v1/models endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelObject>,
}

impl ModelsResponse {
    /// A list holding a single model.
    pub fn single(id: &str, owned_by: &str, created: i64) -> Self {
        Self {
            object: "list".to_string(),
            data: vec![ModelObject {
                id: id.to_string(),
                object: "model".to_string(),
                created,
                owned_by: owned_by.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_response_serialization() {
        let response = ModelsResponse::single("Z-Image", "sd-exacg-gateway", 1234567890);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""id":"Z-Image""#));
        assert!(json.contains(r#""object":"list""#));
        assert!(json.contains(r#""object":"model""#));
        assert!(json.contains(r#""owned_by":"sd-exacg-gateway""#));
    }
}
