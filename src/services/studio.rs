//! Controller mutations on the studio document.
//!
//! Each operation is a synchronous value-level change; handlers apply one
//! under the state lock and then persist the blob. Node edits go through
//! find-then-replace so the tree is never mutated through a shared alias.

#[cfg(test)]
#[path = "studio_test.rs"]
mod studio_test;

use crate::screen::{NodeKind, Screen, fresh_screen_id, quick_add_node};
use crate::state::Studio;
use crate::theme::Theme;

/// Update the selection. `None` or an empty id clears it; ids absent from the
/// tree are allowed and resolve to "nothing selected" at render time.
pub fn select(studio: &mut Studio, id: Option<&str>) {
    studio.selected = match id {
        Some(id) if !id.is_empty() => Some(id.to_owned()),
        _ => None,
    };
}

/// Append a quick-add node of `kind` to the end of the top-level sequence.
/// Existing nodes are untouched. Returns the new node's id.
pub fn quick_add(studio: &mut Studio, kind: NodeKind) -> String {
    let node = quick_add_node(kind);
    let id = node.id.clone();
    studio.screen.components.push(node);
    id
}

/// Patch the selected node's text content. No-op without a resolvable selection.
pub fn patch_content(studio: &mut Studio, value: &str) -> bool {
    let Some(node) = studio.selected_node() else {
        return false;
    };
    let mut updated = node.clone();
    updated.content = Some(value.to_owned());
    let id = updated.id.clone();
    studio.screen.replace_node(&id, updated)
}

/// Merge one style key into the selected node's open style bag.
pub fn patch_style(studio: &mut Studio, key: &str, value: &str) -> bool {
    let Some(node) = studio.selected_node() else {
        return false;
    };
    let mut updated = node.clone();
    updated.set_style_key(key, value);
    let id = updated.id.clone();
    studio.screen.replace_node(&id, updated)
}

/// Replace a node's image source by id.
pub fn patch_src(studio: &mut Studio, node_id: &str, src: &str) -> bool {
    let Some(node) = studio.screen.find_node(node_id) else {
        return false;
    };
    let mut updated = node.clone();
    updated.src = Some(src.to_owned());
    studio.screen.replace_node(node_id, updated)
}

/// Flip the theme toggle control.
pub fn toggle_theme(studio: &mut Studio) {
    studio.theme = studio.theme.toggled();
}

/// Set an explicit theme.
pub fn set_theme(studio: &mut Studio, theme: Theme) {
    studio.theme = theme;
}

/// Install a freshly generated screen under a new screen id.
pub fn replace_screen_generated(studio: &mut Studio, mut screen: Screen) {
    screen.id = fresh_screen_id();
    studio.screen = screen;
}

/// Install a screen reconstructed from a screenshot, verbatim.
pub fn replace_screen_analyzed(studio: &mut Studio, screen: Screen) {
    studio.screen = screen;
}
