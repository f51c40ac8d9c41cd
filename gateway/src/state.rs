//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::enhance::{OpenAiEnhancer, PromptEnhancer};
use crate::image::{ExacgClient, ImageGenerator};
use crate::pipeline::{RandomSeed, SeedSource};

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub enhancer: Arc<dyn PromptEnhancer>,
    pub generator: Arc<dyn ImageGenerator>,
    pub seeds: Arc<dyn SeedSource>,
}

impl AppState {
    /// State wired to the real upstream services.
    pub fn new(config: Config) -> Self {
        let enhancer = Arc::new(OpenAiEnhancer::new(&config.enhance));
        let generator = Arc::new(ExacgClient::new(&config.image));
        Self::with_collaborators(config, enhancer, generator, Arc::new(RandomSeed))
    }

    pub fn with_collaborators(
        config: Config,
        enhancer: Arc<dyn PromptEnhancer>,
        generator: Arc<dyn ImageGenerator>,
        seeds: Arc<dyn SeedSource>,
    ) -> Self {
        Self {
            config,
            enhancer,
            generator,
            seeds,
        }
    }
}
