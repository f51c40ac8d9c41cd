//! Z-Image Gateway Common Types
//!
//! Wire types shared by the gateway: the OpenAI-style chat envelopes it accepts
//! and returns, the aspect ratios it understands, and the payloads it exchanges
//! with its two upstream services.

pub mod aspect;
pub mod chat;
pub mod image;
pub mod llm;
pub mod models;

pub use aspect::AspectRatio;
pub use chat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ContentPart,
    MessageContent, ResponseMessage, Usage,
};
pub use image::{GenerationData, GenerationPayload, GenerationResponse};
pub use llm::{LlmChatRequest, LlmChatResponse, LlmChoice, LlmMessage, LlmResponseMessage};
pub use models::{ModelObject, ModelsResponse};
