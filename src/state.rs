//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the single `Studio` document behind an `RwLock`, the optional
//! generative model (absent when the API key is unconfigured — AI actions
//! degrade to no-ops with a notice), and the blob store that persists
//! `{screen, theme}` after every change.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::gemini::UiModel;
use crate::screen::{Screen, ScreenNode, bootstrap_screen};
use crate::services::persistence::StateStore;
use crate::theme::Theme;

// =============================================================================
// STUDIO
// =============================================================================

/// The single source of truth: current screen, theme, selection, control
/// field values, and in-flight request guards.
pub struct Studio {
    pub screen: Screen,
    pub theme: Theme,
    /// Soft reference to the selected node. Resolved by id at render time;
    /// an id absent from the tree means nothing is selected.
    pub selected: Option<String>,
    /// Last submitted control field values, echoed back into the form.
    pub prompt: String,
    pub brand_name: String,
    pub mood: String,
    /// Gates the generate/screenshot action class while a request is in flight.
    pub generating: bool,
    /// Per-node in-flight guards for AI image edits.
    pub pending_edits: HashSet<String>,
    /// One-shot user-visible error banner, cleared when rendered.
    pub notice: Option<String>,
}

impl Studio {
    #[must_use]
    pub fn new(screen: Screen, theme: Theme) -> Self {
        Self {
            screen,
            theme,
            selected: None,
            prompt: String::new(),
            brand_name: String::new(),
            mood: "Modern & Clean".into(),
            generating: false,
            pending_edits: HashSet::new(),
            notice: None,
        }
    }

    /// The currently selected node, if the selection id resolves.
    #[must_use]
    pub fn selected_node(&self) -> Option<&ScreenNode> {
        self.screen.find_node(self.selected.as_deref()?)
    }

    /// Take the one-shot notice, leaving none behind.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(bootstrap_screen(), Theme::default())
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub studio: Arc<RwLock<Studio>>,
    /// Optional generative model. `None` if `GEMINI_API_KEY` is not set.
    pub model: Option<Arc<dyn UiModel>>,
    pub store: Arc<StateStore>,
}

impl AppState {
    #[must_use]
    pub fn new(studio: Studio, model: Option<Arc<dyn UiModel>>, store: StateStore) -> Self {
        Self { studio: Arc::new(RwLock::new(studio)), model, store: Arc::new(store) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
