//! AI orchestration — user actions that cross the model boundary.
//!
//! DESIGN
//! ======
//! Three flows: prompt → full screen, screenshot → full screen, and per-node
//! image edit. Each is a single awaited round trip with no retry and no
//! cancellation; whichever response lands last wins. The generate/screenshot
//! action class is gated by `Studio::generating`, image edits by a per-node
//! token in `Studio::pending_edits` — both are cleared on every outcome
//! before the result is applied, and by drop guards when the request future
//! is dropped on client disconnect.
//!
//! ERROR HANDLING
//! ==============
//! Screen generation failures bubble up so the page can show a blocking
//! notice. Image-edit failures (fetch or model) are logged and swallowed:
//! the edit silently no-ops, per the editor contract.

#[cfg(test)]
#[path = "generate_test.rs"]
mod generate_test;

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::studio;
use crate::gemini::GeminiError;
use crate::screen::NodeKind;
use crate::state::{AppState, Studio};

/// Errors from AI-triggered actions.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// No model is configured (missing API key).
    #[error("model not configured")]
    ModelNotConfigured,

    /// The model call failed or returned an unusable response.
    #[error("generation failed: {0}")]
    Gemini(#[from] GeminiError),

    /// A remote image could not be retrieved or decoded for editing.
    #[error("image fetch failed: {0}")]
    Fetch(String),
}

// =============================================================================
// IN-FLIGHT GUARDS
// =============================================================================

/// Clears `Studio::generating` when dropped. The request future is dropped
/// mid-await when the client disconnects; without the guard the generate
/// button would stay disabled forever.
struct GeneratingGuard {
    studio: Arc<RwLock<Studio>>,
}

impl Drop for GeneratingGuard {
    fn drop(&mut self) {
        match self.studio.try_write() {
            Ok(mut studio) => studio.generating = false,
            Err(_) => {
                // Lock held elsewhere; clear on the runtime instead.
                let studio = Arc::clone(&self.studio);
                tokio::spawn(async move {
                    studio.write().await.generating = false;
                });
            }
        }
    }
}

/// Removes a per-node pending-edit token when dropped, same contract as
/// [`GeneratingGuard`].
struct PendingEditGuard {
    studio: Arc<RwLock<Studio>>,
    node_id: String,
}

impl Drop for PendingEditGuard {
    fn drop(&mut self) {
        match self.studio.try_write() {
            Ok(mut studio) => {
                studio.pending_edits.remove(&self.node_id);
            }
            Err(_) => {
                let studio = Arc::clone(&self.studio);
                let node_id = self.node_id.clone();
                tokio::spawn(async move {
                    studio.write().await.pending_edits.remove(&node_id);
                });
            }
        }
    }
}

// =============================================================================
// SCREEN GENERATION
// =============================================================================

/// Generate a full screen from the prompt controls and install it.
///
/// A whitespace-only prompt performs no gateway call and leaves state
/// unchanged. While a generation is already in flight the action is ignored
/// (the button is disabled, but a stale form can still post).
///
/// # Errors
///
/// Returns the gateway error so the caller can surface a blocking notice; the
/// screen is never partially replaced.
pub async fn generate_from_text(
    state: &AppState,
    prompt: &str,
    brand_name: &str,
    mood: &str,
) -> Result<(), GenerateError> {
    if prompt.trim().is_empty() {
        return Ok(());
    }
    let Some(model) = state.model.clone() else {
        return Err(GenerateError::ModelNotConfigured);
    };

    {
        let mut studio = state.studio.write().await;
        if studio.generating {
            info!("generation already in flight — ignoring");
            return Ok(());
        }
        studio.generating = true;
        studio.selected = None;
    }
    let _guard = GeneratingGuard { studio: Arc::clone(&state.studio) };

    let result = model.generate_screen(prompt, brand_name, mood).await;

    // Cleared on every outcome before the result is applied; the guard
    // covers a dropped future.
    let mut studio = state.studio.write().await;
    studio.generating = false;
    match result {
        Ok(screen) => {
            info!(components = screen.node_count(), "screen generated");
            studio::replace_screen_generated(&mut studio, screen);
            state.store.save(&studio.screen, studio.theme);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "screen generation failed");
            Err(e.into())
        }
    }
}

/// Reconstruct a screen from an uploaded screenshot and install it verbatim.
///
/// # Errors
///
/// Same contract as [`generate_from_text`].
pub async fn screen_from_upload(state: &AppState, image: &[u8], mime_type: &str) -> Result<(), GenerateError> {
    let Some(model) = state.model.clone() else {
        return Err(GenerateError::ModelNotConfigured);
    };

    {
        let mut studio = state.studio.write().await;
        if studio.generating {
            info!("generation already in flight — ignoring upload");
            return Ok(());
        }
        studio.generating = true;
    }
    let _guard = GeneratingGuard { studio: Arc::clone(&state.studio) };

    let result = model.screen_from_image(image, mime_type).await;

    let mut studio = state.studio.write().await;
    studio.generating = false;
    match result {
        Ok(screen) => {
            info!(components = screen.node_count(), "screenshot analyzed");
            studio::replace_screen_analyzed(&mut studio, screen);
            state.store.save(&studio.screen, studio.theme);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "screenshot analysis failed");
            Err(e.into())
        }
    }
}

// =============================================================================
// IMAGE EDIT
// =============================================================================

/// Apply an AI edit to an Image node's asset, replacing its `src` with the
/// returned inline payload.
///
/// Performs no gateway call when the node is missing, not an Image, has no
/// `src`, or already has an edit in flight. Failures are logged by the caller
/// and the edit no-ops; the node keeps its previous `src`.
///
/// # Errors
///
/// Returns a [`GenerateError`] describing the fetch or model failure.
pub async fn edit_node_image(state: &AppState, node_id: &str, instruction: &str) -> Result<(), GenerateError> {
    let Some(model) = state.model.clone() else {
        return Err(GenerateError::ModelNotConfigured);
    };

    let src = {
        let mut studio = state.studio.write().await;
        let Some(node) = studio.screen.find_node(node_id) else {
            return Ok(());
        };
        if node.kind != NodeKind::Image {
            return Ok(());
        }
        let Some(src) = node.src.clone() else {
            return Ok(());
        };
        if !studio.pending_edits.insert(node_id.to_owned()) {
            info!(%node_id, "image edit already in flight — ignoring");
            return Ok(());
        }
        src
    };
    let _guard = PendingEditGuard { studio: Arc::clone(&state.studio), node_id: node_id.to_owned() };

    let result = run_image_edit(model.as_ref(), &src, instruction).await;

    let mut studio = state.studio.write().await;
    studio.pending_edits.remove(node_id);
    match result {
        Ok(bytes) => {
            let data_uri = format!("data:image/png;base64,{}", BASE64.encode(&bytes));
            studio::patch_src(&mut studio, node_id, &data_uri);
            state.store.save(&studio.screen, studio.theme);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn run_image_edit(
    model: &dyn crate::gemini::UiModel,
    src: &str,
    instruction: &str,
) -> Result<Vec<u8>, GenerateError> {
    let bytes = if src.starts_with("http://") || src.starts_with("https://") {
        fetch_image_bytes(src).await?
    } else {
        decode_data_uri(src)?
    };
    Ok(model.edit_image(&bytes, instruction).await?)
}

/// Fetch a remote image and return its raw bytes.
async fn fetch_image_bytes(url: &str) -> Result<Vec<u8>, GenerateError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| GenerateError::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(GenerateError::Fetch(format!("status {}", response.status().as_u16())));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| GenerateError::Fetch(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Decode the base64 payload of an inline `data:` URI.
fn decode_data_uri(src: &str) -> Result<Vec<u8>, GenerateError> {
    let payload = src
        .split_once(',')
        .map_or(src, |(_, payload)| payload);
    BASE64
        .decode(payload.trim())
        .map_err(|e| GenerateError::Fetch(format!("inline payload decode: {e}")))
}
