//! Image-generation backend.

mod exacg;

pub use exacg::ExacgClient;

use async_trait::async_trait;
use zimage_common::GenerationPayload;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The backend answered, but not with an image.
    #[error("{0}")]
    Upstream(String),

    /// The call itself could not be completed.
    #[error("{0}")]
    Request(String),
}

impl From<GenerationError> for Error {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Upstream(msg) => Error::Upstream(msg),
            GenerationError::Request(msg) => Error::Internal(msg),
        }
    }
}

/// Generates an image and returns its URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationError>;
}
