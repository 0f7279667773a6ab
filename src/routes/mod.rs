//! Router assembly.
//!
//! The whole interface is the visual UI: one page route, action posts that
//! redirect back to it, and the export download. There is no separate API
//! surface.

pub mod pages;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::page))
        .route("/select", get(pages::select))
        .route("/generate", post(pages::generate))
        .route("/screenshot", post(pages::screenshot))
        .route("/theme", post(pages::set_theme))
        .route("/quick-add", post(pages::quick_add))
        .route("/inspector/content", post(pages::inspector_content))
        .route("/inspector/style", post(pages::inspector_style))
        .route("/inspector/image-edit", post(pages::inspector_image_edit))
        .route("/export", get(pages::export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
