//! Z-Image Gateway binary.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zimage_gateway::{app, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml or the ZIMAGE__SECTION__KEY environment variables.",
            e
        )
    })?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Z-Image gateway for model {}", config.model.id);

    if config.auth.api_key.as_deref().map_or(true, str::is_empty) {
        tracing::warn!("No gateway API key configured, every request will be rejected");
    }
    if config.enhance.api_key.as_deref().map_or(true, str::is_empty) {
        tracing::warn!("No enhancement API key configured, prompts will not be enhanced");
    } else {
        tracing::info!(
            "Prompt enhancement via {} at {}",
            config.enhance.model,
            config.enhance.base_url
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config));

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
