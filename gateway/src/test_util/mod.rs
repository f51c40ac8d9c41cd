//! Test doubles for the gateway's collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use zimage_common::{AspectRatio, GenerationPayload};

use crate::config::Config;
use crate::enhance::{EnhanceError, Enhancement, EnhancementResult, PromptEnhancer};
use crate::image::{GenerationError, ImageGenerator};
use crate::pipeline::FixedSeed;
use crate::state::AppState;

pub const TEST_API_KEY: &str = "test-gateway-key";
pub const TEST_IMAGE_URL: &str = "https://images.test/generated.png";

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.api_key = Some(TEST_API_KEY.to_string());
    config.logging.level = "debug".to_string();
    config
}

/// Enhancer returning a canned result and recording how it was called.
pub struct StubEnhancer {
    result: EnhancementResult,
    calls: AtomicUsize,
    last_user_ratio: Mutex<Option<Option<AspectRatio>>>,
}

impl StubEnhancer {
    pub fn new(result: EnhancementResult) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_user_ratio: Mutex::new(None),
        }
    }

    pub fn succeeding(prompt: &str, aspect_ratio: Option<&str>) -> Self {
        Self::new(Ok(Enhancement {
            prompt: prompt.to_string(),
            aspect_ratio: aspect_ratio.map(String::from),
        }))
    }

    pub fn failing(error: EnhanceError) -> Self {
        Self::new(Err(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `user_ratio` argument of the latest call, `None` if never called.
    pub fn last_user_ratio(&self) -> Option<Option<AspectRatio>> {
        *self.last_user_ratio.lock().unwrap()
    }
}

#[async_trait]
impl PromptEnhancer for StubEnhancer {
    async fn enhance(&self, _prompt: &str, user_ratio: Option<AspectRatio>) -> EnhancementResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_ratio.lock().unwrap() = Some(user_ratio);
        self.result.clone()
    }
}

/// Image generator returning a canned result and recording payloads.
pub struct StubGenerator {
    result: Result<String, GenerationError>,
    calls: AtomicUsize,
    last_payload: Mutex<Option<GenerationPayload>>,
}

impl StubGenerator {
    pub fn new(result: Result<String, GenerationError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Ok(TEST_IMAGE_URL.to_string()))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::new(Err(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<GenerationPayload> {
        self.last_payload.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        self.result.clone()
    }
}

/// State with stub collaborators and a fixed seed of 12345.
pub fn test_state(
    config: Config,
    enhancer: Arc<StubEnhancer>,
    generator: Arc<StubGenerator>,
) -> Arc<AppState> {
    Arc::new(AppState::with_collaborators(
        config,
        enhancer,
        generator,
        Arc::new(FixedSeed(12345)),
    ))
}
