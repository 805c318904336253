use std::env;

use url::Url;

use crate::errors::KreatorError;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_WAVESPEED_BASE_URL: &str = "https://api.wavespeed.ai/api/v3";

/// Both assistant models default to the same multimodal model; the vision
/// model also serves chat, which can carry image parts.
pub const DEFAULT_TEXT_MODEL: &str = "google/gemini-2.0-flash-001";
pub const DEFAULT_VISION_MODEL: &str = "google/gemini-2.0-flash-001";

pub const DEFAULT_APP_REFERER: &str = "http://localhost:3000";
pub const DEFAULT_APP_TITLE: &str = "KreatorAI";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openrouter_base_url: String,
    pub wavespeed_base_url: String,
    pub text_model: String,
    pub vision_model: String,
    /// Sent as the `HTTP-Referer` header to identify the calling app.
    pub app_referer: String,
    /// Sent as the `X-Title` header.
    pub app_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            wavespeed_base_url: DEFAULT_WAVESPEED_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            app_referer: DEFAULT_APP_REFERER.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to the
    /// compiled defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns a config error when an overridden base URL does not parse.
    pub fn from_env() -> Result<Self, KreatorError> {
        let config = Self {
            openrouter_base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            wavespeed_base_url: env::var("WAVESPEED_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WAVESPEED_BASE_URL.to_string()),
            text_model: env::var("KREATOR_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: env::var("KREATOR_VISION_MODEL")
                .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string()),
            app_referer: env::var("KREATOR_APP_REFERER")
                .unwrap_or_else(|_| DEFAULT_APP_REFERER.to_string()),
            app_title: env::var("KREATOR_APP_TITLE")
                .unwrap_or_else(|_| DEFAULT_APP_TITLE.to_string()),
        };

        Url::parse(&config.openrouter_base_url)
            .map_err(|e| KreatorError::Config(format!("OPENROUTER_BASE_URL: {e}")))?;
        Url::parse(&config.wavespeed_base_url)
            .map_err(|e| KreatorError::Config(format!("WAVESPEED_BASE_URL: {e}")))?;

        Ok(config)
    }
}
