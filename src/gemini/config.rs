//! Gemini configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use super::types::GeminiError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_UI_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Typed Gemini client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Model for screen generation (text and screenshot analysis).
    pub ui_model: String,
    /// Image-capable model for asset edits.
    pub image_model: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl GeminiConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional:
    /// - `DESIGNFLOW_UI_MODEL`: default `gemini-3-pro-preview`
    /// - `DESIGNFLOW_IMAGE_MODEL`: default `gemini-2.5-flash-image`
    /// - `GEMINI_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GEMINI_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] when the key variable is unset.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| GeminiError::MissingApiKey { var: API_KEY_VAR.into() })?;

        Ok(Self {
            api_key,
            ui_model: std::env::var("DESIGNFLOW_UI_MODEL").unwrap_or_else(|_| DEFAULT_UI_MODEL.into()),
            image_model: std::env::var("DESIGNFLOW_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.into()),
            request_timeout_secs: env_parse_u64("GEMINI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: env_parse_u64("GEMINI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
