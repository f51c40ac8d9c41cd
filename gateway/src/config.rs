//! Configuration for the gateway.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure, built once at startup and shared read-only.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub enhance: EnhanceConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Gateway-level authentication.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Bearer token clients must present. When unset, every request is rejected.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Prompt enhancement through an OpenAI-compatible chat model.
#[derive(Debug, Clone, Deserialize)]
pub struct EnhanceConfig {
    /// When unset, enhancement is reported as not configured and skipped.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_enhance_base_url")]
    pub base_url: String,
    #[serde(default = "default_enhance_model")]
    pub model: String,
    #[serde(default = "default_enhance_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_enhance_base_url(),
            model: default_enhance_model(),
            timeout_secs: default_enhance_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Image-generation backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_image_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_model_index")]
    pub model_index: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_image_endpoint(),
            steps: default_steps(),
            model_index: default_model_index(),
        }
    }
}

/// The single model this gateway exposes.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_id")]
    pub id: String,
    #[serde(default = "default_owned_by")]
    pub owned_by: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: default_model_id(),
            owned_by: default_owned_by(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8787
}
fn default_enhance_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_enhance_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_enhance_timeout() -> u64 {
    10
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    500
}
fn default_image_endpoint() -> String {
    "https://sd.exacg.cc/api/v1/generate_image".to_string()
}
fn default_steps() -> u32 {
    8
}
fn default_model_index() -> u32 {
    5
}
fn default_model_id() -> String {
    "Z-Image".to_string()
}
fn default_owned_by() -> String {
    "sd-exacg-gateway".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (ZIMAGE__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("ZIMAGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
