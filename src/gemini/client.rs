//! Gemini `generateContent` HTTP client.
//!
//! Thin wrapper over the REST endpoint; everything that can be tested
//! without a network round trip (prompt assembly, fence stripping, screen
//! parsing, inline payload extraction) lives in pure functions.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::config::GeminiConfig;
use super::types::{
    Content, GeminiError, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, UiModel,
    first_inline_data, first_text, parse_screen,
};
use crate::screen::Screen;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::HttpClientBuild`] if the HTTP client fails.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| GeminiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, GeminiError> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Model used for screen generation, for startup logging.
    #[must_use]
    pub fn ui_model(&self) -> &str {
        &self.config.ui_model
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{API_BASE_URL}/{model}:generateContent");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GeminiError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(GeminiError::ApiResponse { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| GeminiError::ApiParse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl UiModel for GeminiClient {
    async fn generate_screen(&self, prompt: &str, brand_name: &str, mood: &str) -> Result<Screen, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part::text(build_ui_prompt(prompt, brand_name, mood))] }],
            generation_config: Some(GenerationConfig { response_mime_type: Some("application/json") }),
        };
        let response = self.generate_content(&self.config.ui_model, &request).await?;
        let text = first_text(&response).ok_or_else(|| GeminiError::ApiParse("empty response".into()))?;
        parse_screen(&text)
    }

    async fn screen_from_image(&self, image: &[u8], mime_type: &str) -> Result<Screen, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data(mime_type, BASE64.encode(image)),
                    Part::text(SCREENSHOT_PROMPT),
                ],
            }],
            generation_config: Some(GenerationConfig { response_mime_type: Some("application/json") }),
        };
        let response = self.generate_content(&self.config.ui_model, &request).await?;
        let text = first_text(&response).ok_or_else(|| GeminiError::ApiParse("empty response".into()))?;
        parse_screen(&text)
    }

    async fn edit_image(&self, image: &[u8], instruction: &str) -> Result<Vec<u8>, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data("image/png", BASE64.encode(image)),
                    Part::text(instruction),
                ],
            }],
            // The image model returns a generated image in the response parts;
            // no JSON response mime here.
            generation_config: None,
        };
        let response = self.generate_content(&self.config.image_model, &request).await?;
        let inline = first_inline_data(&response).ok_or(GeminiError::NoImageProduced)?;
        BASE64
            .decode(&inline.data)
            .map_err(|e| GeminiError::ApiParse(e.to_string()))
    }
}

// =============================================================================
// PROMPTS
// =============================================================================

const SCREENSHOT_PROMPT: &str = "Analyze this mobile UI screenshot. Reconstruct it as a JSON UI \
     definition following the schema: { id, name, backgroundColor, components: [{id, type, style, \
     content, src}] }. Be precise with colors and layout.";

/// Instruction payload for screen generation: schema, component minimum, and
/// brand context.
#[must_use]
pub fn build_ui_prompt(prompt: &str, brand_name: &str, mood: &str) -> String {
    format!(
        "You are a world-class Mobile UI/UX Designer.\n\
         Generate a JSON structure for a mobile app screen based on the user's request.\n\
         \n\
         Brand Name: {brand_name}\n\
         Mood: {mood}\n\
         \n\
         Rules:\n\
         1. Use \"type\" one of: 'Button', 'Card', 'Input', 'Header', 'Text', 'Image', 'Navbar', 'List'.\n\
         2. \"style\" must be an object with React-compatible CSS properties (camelCase), but values \
         should be Tailwind-like conceptual values if possible, or standard CSS.\n\
         3. Ensure high contrast and mobile accessibility.\n\
         4. Create a complete, realistic layout with at least 5-8 components.\n\
         5. Return ONLY valid JSON.\n\
         \n\
         Structure:\n\
         {{\n\
           \"id\": \"screen_1\",\n\
           \"name\": \"Home\",\n\
           \"backgroundColor\": \"#1e293b\",\n\
           \"components\": [ ... ]\n\
         }}\n\
         \n\
         User Prompt: {prompt}"
    )
}
