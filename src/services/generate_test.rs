use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::screen::{Screen, bootstrap_screen};
use crate::state::test_helpers;

// =============================================================================
// MOCK MODEL
// =============================================================================

#[derive(Default)]
struct MockModel {
    calls: AtomicUsize,
    fail: bool,
    screen: Option<Screen>,
    image: Option<Vec<u8>>,
}

impl MockModel {
    fn returning_screen(screen: Screen) -> Self {
        Self { screen: Some(screen), ..Self::default() }
    }

    fn returning_image(bytes: Vec<u8>) -> Self {
        Self { image: Some(bytes), ..Self::default() }
    }

    fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl crate::gemini::UiModel for MockModel {
    async fn generate_screen(&self, _prompt: &str, _brand: &str, _mood: &str) -> Result<Screen, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeminiError::ApiParse("mock failure".into()));
        }
        Ok(self.screen.clone().expect("mock screen"))
    }

    async fn screen_from_image(&self, _image: &[u8], _mime: &str) -> Result<Screen, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeminiError::ApiParse("mock failure".into()));
        }
        Ok(self.screen.clone().expect("mock screen"))
    }

    async fn edit_image(&self, _image: &[u8], _instruction: &str) -> Result<Vec<u8>, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.image.clone().ok_or(GeminiError::NoImageProduced)
    }
}

/// Never completes; stands in for a request still in flight when the client
/// disconnects.
struct HangingModel;

#[async_trait::async_trait]
impl crate::gemini::UiModel for HangingModel {
    async fn generate_screen(&self, _prompt: &str, _brand: &str, _mood: &str) -> Result<Screen, GeminiError> {
        std::future::pending().await
    }

    async fn screen_from_image(&self, _image: &[u8], _mime: &str) -> Result<Screen, GeminiError> {
        std::future::pending().await
    }

    async fn edit_image(&self, _image: &[u8], _instruction: &str) -> Result<Vec<u8>, GeminiError> {
        std::future::pending().await
    }
}

fn generated_screen() -> Screen {
    let mut screen = bootstrap_screen();
    screen.id = "screen_1".into();
    screen.name = "Generated".into();
    screen
}

// =============================================================================
// GENERATE FROM TEXT
// =============================================================================

#[tokio::test]
async fn empty_prompt_is_a_noop() {
    let model = Arc::new(MockModel::returning_screen(generated_screen()));
    let state = test_helpers::test_app_state_with_model(model.clone());

    generate_from_text(&state, "   \n\t ", "Brand", "Calm").await.unwrap();

    assert_eq!(model.call_count(), 0, "no gateway call");
    let studio = state.studio.read().await;
    assert_eq!(studio.screen, bootstrap_screen(), "state unchanged");
    assert!(!studio.generating);
}

#[tokio::test]
async fn generate_replaces_screen_and_persists() {
    let model = Arc::new(MockModel::returning_screen(generated_screen()));
    let state = test_helpers::test_app_state_with_model(model.clone());
    {
        let mut studio = state.studio.write().await;
        studio.selected = Some("btn1".into());
    }

    generate_from_text(&state, "a meditation app", "ZenFlow", "Calm").await.unwrap();

    assert_eq!(model.call_count(), 1);
    let studio = state.studio.read().await;
    assert_eq!(studio.screen.name, "Generated");
    assert!(studio.screen.id.starts_with("screen_"), "fresh id");
    assert_ne!(studio.screen.id, "screen_1");
    assert!(studio.selected.is_none(), "selection cleared before generating");
    assert!(!studio.generating, "flag cleared");

    let blob = state.store.load().expect("persisted after change");
    assert_eq!(blob.screen, studio.screen);
}

#[tokio::test]
async fn generate_failure_is_total() {
    let model = Arc::new(MockModel::failing());
    let state = test_helpers::test_app_state_with_model(model);

    let err = generate_from_text(&state, "anything", "", "").await.unwrap_err();
    assert!(matches!(err, GenerateError::Gemini(GeminiError::ApiParse(_))));

    let studio = state.studio.read().await;
    assert_eq!(studio.screen, bootstrap_screen(), "no partial screen");
    assert!(!studio.generating, "flag cleared on failure too");
}

#[tokio::test]
async fn generate_without_model_reports_not_configured() {
    let state = test_helpers::test_app_state();
    let err = generate_from_text(&state, "anything", "", "").await.unwrap_err();
    assert!(matches!(err, GenerateError::ModelNotConfigured));
}

#[tokio::test]
async fn dropped_generation_future_clears_in_flight_flag() {
    let state = test_helpers::test_app_state_with_model(Arc::new(HangingModel));

    let task = tokio::spawn({
        let state = state.clone();
        async move { generate_from_text(&state, "a banking app", "", "").await }
    });
    while !state.studio.read().await.generating {
        tokio::task::yield_now().await;
    }

    // Client disconnect: the request future is dropped mid-await.
    task.abort();
    let _ = task.await;

    assert!(!state.studio.read().await.generating, "flag cleared when the request is dropped");
}

#[tokio::test]
async fn generate_is_gated_while_in_flight() {
    let model = Arc::new(MockModel::returning_screen(generated_screen()));
    let state = test_helpers::test_app_state_with_model(model.clone());
    state.studio.write().await.generating = true;

    generate_from_text(&state, "anything", "", "").await.unwrap();
    assert_eq!(model.call_count(), 0);
    assert_eq!(state.studio.read().await.screen, bootstrap_screen());
}

// =============================================================================
// SCREENSHOT ANALYSIS
// =============================================================================

#[tokio::test]
async fn screenshot_installs_screen_verbatim() {
    let mut screen = generated_screen();
    screen.id = "from_screenshot".into();
    let model = Arc::new(MockModel::returning_screen(screen));
    let state = test_helpers::test_app_state_with_model(model.clone());

    screen_from_upload(&state, b"\x89PNG fake", "image/png").await.unwrap();

    assert_eq!(model.call_count(), 1);
    let studio = state.studio.read().await;
    assert_eq!(studio.screen.id, "from_screenshot", "id kept verbatim");
    assert!(!studio.generating);
}

// =============================================================================
// IMAGE EDIT
// =============================================================================

/// Point the bootstrap Image node at an inline payload so no fetch happens.
async fn inline_image_state(model: Arc<dyn crate::gemini::UiModel>) -> crate::state::AppState {
    let state = test_helpers::test_app_state_with_model(model);
    let mut studio = state.studio.write().await;
    studio::patch_src(&mut studio, "img1", "data:image/png;base64,QUJDRA==");
    drop(studio);
    state
}

#[tokio::test]
async fn edit_image_replaces_src_with_inline_payload() {
    let model = Arc::new(MockModel::returning_image(vec![1, 2, 3]));
    let state = inline_image_state(model.clone()).await;

    edit_node_image(&state, "img1", "make it sunset").await.unwrap();

    assert_eq!(model.call_count(), 1);
    let studio = state.studio.read().await;
    let src = studio.screen.find_node("img1").unwrap().src.as_deref().unwrap();
    assert_eq!(src, "data:image/png;base64,AQID");
    assert!(studio.pending_edits.is_empty(), "per-node token cleared");
}

#[tokio::test]
async fn edit_image_without_src_performs_no_call() {
    let model = Arc::new(MockModel::returning_image(vec![1]));
    let state = test_helpers::test_app_state_with_model(model.clone());
    {
        let mut studio = state.studio.write().await;
        let mut node = studio.screen.find_node("img1").unwrap().clone();
        node.src = None;
        studio.screen.replace_node("img1", node);
    }

    edit_node_image(&state, "img1", "anything").await.unwrap();
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn edit_image_on_non_image_node_performs_no_call() {
    let model = Arc::new(MockModel::returning_image(vec![1]));
    let state = test_helpers::test_app_state_with_model(model.clone());

    edit_node_image(&state, "btn1", "anything").await.unwrap();
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn edit_image_failure_keeps_previous_src() {
    let model = Arc::new(MockModel::default()); // edit_image -> NoImageProduced
    let state = inline_image_state(model.clone()).await;

    let err = edit_node_image(&state, "img1", "anything").await.unwrap_err();
    assert!(matches!(err, GenerateError::Gemini(GeminiError::NoImageProduced)));

    let studio = state.studio.read().await;
    let src = studio.screen.find_node("img1").unwrap().src.as_deref().unwrap();
    assert_eq!(src, "data:image/png;base64,QUJDRA==", "edit silently no-ops");
    assert!(studio.pending_edits.is_empty());
}

#[tokio::test]
async fn dropped_image_edit_clears_pending_token() {
    let state = inline_image_state(Arc::new(HangingModel)).await;

    let task = tokio::spawn({
        let state = state.clone();
        async move { edit_node_image(&state, "img1", "anything").await }
    });
    while state.studio.read().await.pending_edits.is_empty() {
        tokio::task::yield_now().await;
    }

    task.abort();
    let _ = task.await;

    assert!(
        state.studio.read().await.pending_edits.is_empty(),
        "token cleared when the request is dropped"
    );
}

#[tokio::test]
async fn edit_image_is_gated_per_node() {
    let model = Arc::new(MockModel::returning_image(vec![9]));
    let state = inline_image_state(model.clone()).await;
    state.studio.write().await.pending_edits.insert("img1".into());

    edit_node_image(&state, "img1", "anything").await.unwrap();
    assert_eq!(model.call_count(), 0);
}

// =============================================================================
// DATA URI DECODING
// =============================================================================

#[test]
fn decode_data_uri_with_prefix() {
    assert_eq!(decode_data_uri("data:image/png;base64,QUJD").unwrap(), b"ABC");
}

#[test]
fn decode_data_uri_bare_payload() {
    assert_eq!(decode_data_uri("QUJD").unwrap(), b"ABC");
}

#[test]
fn decode_data_uri_rejects_garbage() {
    assert!(matches!(decode_data_uri("data:image/png;base64,!!!"), Err(GenerateError::Fetch(_))));
}
