//! UI-facing handlers: the studio page and its action posts.
//!
//! Every mutating action applies one controller operation under the state
//! lock, persists the `{screen, theme}` blob, and redirects back to `/`.
//! Generation failures surface as a one-shot notice on the next page render;
//! image-edit and export failures are logged only.

#[cfg(test)]
#[path = "pages_test.rs"]
mod pages_test;

use axum::extract::{Multipart, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::warn;

use crate::render;
use crate::screen::NodeKind;
use crate::services::export::{export_filename, export_png};
use crate::services::generate::{self, GenerateError};
use crate::services::studio;
use crate::state::AppState;
use crate::theme::Theme;

const GENERATE_FAILED_NOTICE: &str = "Failed to generate UI. Please try again.";
const ANALYZE_FAILED_NOTICE: &str = "Failed to analyze screenshot.";
const NOT_CONFIGURED_NOTICE: &str = "AI is not configured. Set GEMINI_API_KEY and restart.";

/// `GET /` — render the studio.
pub async fn page(State(state): State<AppState>) -> Html<String> {
    let mut studio = state.studio.write().await;
    let notice = studio.take_notice();
    Html(render::render_page(&studio, notice.as_deref()))
}

#[derive(Deserialize)]
pub struct SelectParams {
    pub id: Option<String>,
}

/// `GET /select?id=` — update the selection. An empty id (background click)
/// clears it; ids absent from the tree are allowed.
pub async fn select(State(state): State<AppState>, Query(params): Query<SelectParams>) -> Redirect {
    let mut studio = state.studio.write().await;
    studio::select(&mut studio, params.id.as_deref());
    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub mood: String,
}

/// `POST /generate` — generate a screen from the prompt controls.
pub async fn generate(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Redirect {
    {
        // Echo the submitted controls back into the form either way.
        let mut studio = state.studio.write().await;
        studio.prompt = form.prompt.clone();
        studio.brand_name = form.brand_name.clone();
        studio.mood = form.mood.clone();
    }

    if let Err(e) = generate::generate_from_text(&state, &form.prompt, &form.brand_name, &form.mood).await {
        let mut studio = state.studio.write().await;
        studio.notice = Some(notice_for(&e, GENERATE_FAILED_NOTICE));
    }
    Redirect::to("/")
}

/// `POST /screenshot` — reconstruct a screen from an uploaded image.
pub async fn screenshot(State(state): State<AppState>, mut multipart: Multipart) -> Redirect {
    let mut upload: Option<(Vec<u8>, String)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let mime = field.content_type().unwrap_or("image/jpeg").to_owned();
            match field.bytes().await {
                Ok(bytes) if !bytes.is_empty() => upload = Some((bytes.to_vec(), mime)),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "screenshot upload read failed"),
            }
            break;
        }
    }
    let Some((bytes, mime)) = upload else {
        return Redirect::to("/");
    };

    if let Err(e) = generate::screen_from_upload(&state, &bytes, &mime).await {
        let mut studio = state.studio.write().await;
        studio.notice = Some(notice_for(&e, ANALYZE_FAILED_NOTICE));
    }
    Redirect::to("/")
}

fn notice_for(error: &GenerateError, failure_notice: &str) -> String {
    match error {
        GenerateError::ModelNotConfigured => NOT_CONFIGURED_NOTICE.to_owned(),
        _ => failure_notice.to_owned(),
    }
}

#[derive(Deserialize)]
pub struct ThemeForm {
    /// Explicit theme name; absent means "toggle".
    pub theme: Option<String>,
}

/// `POST /theme` — toggle or set the theme.
pub async fn set_theme(State(state): State<AppState>, Form(form): Form<ThemeForm>) -> Redirect {
    let mut studio = state.studio.write().await;
    match form.theme.as_deref().and_then(Theme::from_name) {
        Some(theme) => studio::set_theme(&mut studio, theme),
        None => studio::toggle_theme(&mut studio),
    }
    state.store.save(&studio.screen, studio.theme);
    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct QuickAddForm {
    pub kind: String,
}

/// `POST /quick-add` — append a default node of the chosen kind.
pub async fn quick_add(State(state): State<AppState>, Form(form): Form<QuickAddForm>) -> Redirect {
    let mut studio = state.studio.write().await;
    studio::quick_add(&mut studio, NodeKind::from(form.kind));
    state.store.save(&studio.screen, studio.theme);
    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct ValueForm {
    #[serde(default)]
    pub value: String,
}

/// `POST /inspector/content` — patch the selected node's content.
pub async fn inspector_content(State(state): State<AppState>, Form(form): Form<ValueForm>) -> Redirect {
    let mut studio = state.studio.write().await;
    if studio::patch_content(&mut studio, &form.value) {
        state.store.save(&studio.screen, studio.theme);
    }
    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct StyleForm {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// `POST /inspector/style` — merge one style key into the selected node.
pub async fn inspector_style(State(state): State<AppState>, Form(form): Form<StyleForm>) -> Redirect {
    let mut studio = state.studio.write().await;
    if studio::patch_style(&mut studio, &form.key, &form.value) {
        state.store.save(&studio.screen, studio.theme);
    }
    Redirect::to("/")
}

#[derive(Deserialize)]
pub struct ImageEditForm {
    #[serde(default)]
    pub prompt: String,
}

/// `POST /inspector/image-edit` — AI-edit the selected image node's asset.
/// Failures are logged and the edit silently no-ops.
pub async fn inspector_image_edit(State(state): State<AppState>, Form(form): Form<ImageEditForm>) -> Redirect {
    if form.prompt.trim().is_empty() {
        return Redirect::to("/");
    }
    let Some(node_id) = state.studio.read().await.selected.clone() else {
        return Redirect::to("/");
    };

    if let Err(e) = generate::edit_node_image(&state, &node_id, &form.prompt).await {
        warn!(%node_id, error = %e, "image edit abandoned");
    }
    Redirect::to("/")
}

/// `GET /export` — download the screen region as a PNG.
pub async fn export(State(state): State<AppState>) -> Response {
    let (screen, theme) = {
        let studio = state.studio.read().await;
        (studio.screen.clone(), studio.theme)
    };

    match export_png(&screen, theme) {
        Ok(bytes) => {
            let filename = export_filename(&screen.name);
            (
                [
                    (CONTENT_TYPE, "image/png".to_owned()),
                    (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            warn!(error = %e, "export failed");
            Redirect::to("/").into_response()
        }
    }
}
