//! Persistence service — the `{screen, theme}` blob store.
//!
//! DESIGN
//! ======
//! The whole document state is serialized as a single JSON blob after every
//! mutation and reloaded verbatim at startup. Writes are synchronous and
//! unbatched; a failed write or a malformed blob is logged and otherwise
//! ignored — persistence is best-effort and never fatal.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::screen::Screen;
use crate::theme::Theme;

const STATE_PATH_VAR: &str = "DESIGNFLOW_STATE_PATH";
const DEFAULT_STATE_PATH: &str = "designflow_state.json";

/// The persisted blob: the screen document plus the active theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub screen: Screen,
    pub theme: Theme,
}

/// File-backed store for the persisted state blob.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the path named by `DESIGNFLOW_STATE_PATH`, or the fixed
    /// default in the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var(STATE_PATH_VAR).unwrap_or_else(|_| DEFAULT_STATE_PATH.into());
        Self::new(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted blob. A missing file is a clean start; a malformed
    /// blob is logged and treated as absent so the caller falls back to the
    /// bootstrap defaults.
    #[must_use]
    pub fn load(&self) -> Option<PersistedState> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state blob unreadable — using defaults");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state blob malformed — using defaults");
                None
            }
        }
    }

    /// Write the blob. Failures are logged, never surfaced.
    pub fn save(&self, screen: &Screen, theme: Theme) {
        let state = PersistedState { screen: screen.clone(), theme };
        let json = match serde_json::to_string(&state) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "state blob serialization failed");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "state blob write failed");
        } else {
            debug!(path = %self.path.display(), "state blob saved");
        }
    }
}
