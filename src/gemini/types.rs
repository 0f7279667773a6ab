//! Gemini wire types, error taxonomy, and the mockable model trait.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::screen::Screen;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by Gemini gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the model failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The model returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body (or the screen JSON inside it) could not be parsed.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The image-edit response contained no inline image payload.
    #[error("no image produced")]
    NoImageProduced,
}

// =============================================================================
// MODEL TRAIT
// =============================================================================

/// The generative model boundary. Implemented by [`super::GeminiClient`] and
/// by mock models in tests.
#[async_trait::async_trait]
pub trait UiModel: Send + Sync {
    /// Generate a full screen from a freeform prompt plus brand context.
    ///
    /// # Errors
    ///
    /// Returns a [`GeminiError`] if the call fails or the response does not
    /// parse as a well-formed screen. Failure is total — no partial screen.
    async fn generate_screen(&self, prompt: &str, brand_name: &str, mood: &str) -> Result<Screen, GeminiError>;

    /// Reconstruct a full screen from a screenshot.
    ///
    /// # Errors
    ///
    /// Same contract as [`UiModel::generate_screen`].
    async fn screen_from_image(&self, image: &[u8], mime_type: &str) -> Result<Screen, GeminiError>;

    /// Apply an edit instruction to raw image bytes, returning new bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::NoImageProduced`] if the response carries no
    /// inline image, or a transport/parse error.
    async fn edit_image(&self, image: &[u8], instruction: &str) -> Result<Vec<u8>, GeminiError>;
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One request part: text or inline binary data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    #[must_use]
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type: mime_type.into(), data: data.into() }),
        }
    }
}

/// Base64-encoded binary payload with a declared MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<&'static str>,
}

/// `generateContent` response body. Only the fields we read.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

// =============================================================================
// RESPONSE NORMALIZATION
// =============================================================================

/// Strip one leading/trailing markdown code fence if present, otherwise pass
/// the text through unchanged. Models sometimes wrap JSON in ```/```json
/// fences even when asked for a JSON response.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the fence's info string (e.g. "json") up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse generated screen JSON, tolerating a code-fence wrapper.
///
/// # Errors
///
/// Returns [`GeminiError::ApiParse`] when the text is not well-formed screen
/// JSON; the caller treats that as a total failure.
pub fn parse_screen(text: &str) -> Result<Screen, GeminiError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| GeminiError::ApiParse(e.to_string()))
}

/// Concatenated text of the first candidate, if any.
#[must_use]
pub fn first_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let joined: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if joined.is_empty() { None } else { Some(joined) }
}

/// The first inline binary payload anywhere in the response, if any.
#[must_use]
pub fn first_inline_data(response: &GenerateContentResponse) -> Option<&InlineData> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .find_map(|p| p.inline_data.as_ref())
}
