//! Screen markup: the device frame and the per-kind node dispatch.

#[cfg(test)]
#[path = "screen_test.rs"]
mod screen_test;

use super::{css_key, html_escape};
use crate::screen::{NodeKind, PLACEHOLDER_IMAGE_URL, Screen, ScreenNode};
use crate::theme::Theme;

const SELECTION_OUTLINE: &str = "outline:2px solid #a855f7;";

/// Render the screen tree inside the device frame. Pure function of its
/// inputs; the selection outline is presentation-only state.
#[must_use]
pub fn render_screen(screen: &Screen, selected: Option<&str>, theme: Theme) -> String {
    let background = if screen.background_color.is_empty() {
        theme.palette().background
    } else {
        &screen.background_color
    };

    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<div class=\"device-frame\">\n");
    out.push_str("<div class=\"device-notch\"></div>\n");
    out.push_str(&format!(
        "<div class=\"screen-content\" data-role=\"screen-bg\" style=\"background-color:{}\">\n",
        html_escape(background)
    ));
    for node in &screen.components {
        render_node(&mut out, node, selected);
    }
    out.push_str("</div>\n<div class=\"device-home\"></div>\n</div>\n");
    out
}

/// Render one node (and its children) in document order.
fn render_node(out: &mut String, node: &ScreenNode, selected: Option<&str>) {
    let is_selected = selected == Some(node.id.as_str());
    let id = html_escape(&node.id);
    let style = inline_style(node, is_selected);
    let content = html_escape(node.content.as_deref().unwrap_or(""));

    match &node.kind {
        NodeKind::Button => {
            out.push_str(&format!(
                "<div class=\"node node-button\" data-node-id=\"{id}\" style=\"{style}\">{content}</div>\n"
            ));
        }
        NodeKind::Image => {
            let src = html_escape(node.src.as_deref().unwrap_or(PLACEHOLDER_IMAGE_URL));
            out.push_str(&format!(
                "<div class=\"node node-image\" data-node-id=\"{id}\" style=\"{style}\">\
                 <img src=\"{src}\" alt=\"\">"
            ));
            if is_selected {
                out.push_str("<div class=\"image-hint\">Select to Edit AI</div>");
            }
            out.push_str("</div>\n");
        }
        NodeKind::Input => {
            out.push_str(&format!(
                "<input class=\"node node-input\" data-node-id=\"{id}\" style=\"{style}\" \
                 placeholder=\"{content}\" readonly>\n"
            ));
        }
        NodeKind::Card => {
            out.push_str(&format!(
                "<div class=\"node node-card\" data-node-id=\"{id}\" style=\"{style}\">\n"
            ));
            if let Some(children) = &node.children {
                for child in children {
                    render_node(out, child, selected);
                }
            } else {
                let title = html_escape(node.prop_title().unwrap_or("Card Title"));
                let body = if content.is_empty() { "Card content goes here..." } else { &content };
                out.push_str(&format!(
                    "<div class=\"card-body\"><h3>{title}</h3><p>{body}</p></div>\n"
                ));
            }
            out.push_str("</div>\n");
        }
        NodeKind::Header => {
            out.push_str(&format!(
                "<h1 class=\"node node-header\" data-node-id=\"{id}\" style=\"{style}\">{content}</h1>\n"
            ));
        }
        NodeKind::Text => {
            out.push_str(&format!(
                "<p class=\"node node-text\" data-node-id=\"{id}\" style=\"{style}\">{content}</p>\n"
            ));
        }
        NodeKind::Navbar => {
            let title = html_escape(node.prop_title().unwrap_or("App"));
            out.push_str(&format!(
                "<div class=\"node node-navbar\" data-node-id=\"{id}\" style=\"{style}\">\
                 <span class=\"navbar-title\">{title}</span>\
                 <span class=\"navbar-icon\"></span><span class=\"navbar-icon\"></span></div>\n"
            ));
        }
        // List has no dedicated presentation; it renders as a generic block,
        // as does any unrecognized future kind.
        NodeKind::List | NodeKind::Other(_) => {
            out.push_str(&format!(
                "<div class=\"node\" data-node-id=\"{id}\" style=\"{style}\">{content}</div>\n"
            ));
        }
    }
}

/// Build the inline style attribute: open style bag with keys kebab-cased,
/// plus the selection outline when selected.
fn inline_style(node: &ScreenNode, is_selected: bool) -> String {
    let mut out = String::from("position:relative;box-sizing:border-box;");
    for (key, value) in node.style().entries() {
        out.push_str(&css_key(key));
        out.push(':');
        out.push_str(&html_escape(value));
        out.push(';');
    }
    if is_selected {
        out.push_str(SELECTION_OUTLINE);
    }
    out
}
