mod gemini;
mod render;
mod routes;
mod screen;
mod services;
mod state;
mod theme;

use std::sync::Arc;

use crate::services::persistence::StateStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize the Gemini client (non-fatal: AI features disabled if the
    // key is missing).
    let model = match gemini::GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.ui_model(), "Gemini client initialized");
            Some(Arc::new(client) as Arc<dyn gemini::UiModel>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gemini client not configured, AI features disabled");
            None
        }
    };

    let store = StateStore::from_env();
    let studio = match store.load() {
        Some(saved) => {
            tracing::info!(path = %store.path().display(), "restored saved state");
            state::Studio::new(saved.screen, saved.theme)
        }
        None => state::Studio::default(),
    };

    let state = state::AppState::new(studio, model, store);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "designflow listening");
    axum::serve(listener, app).await.expect("server failed");
}
