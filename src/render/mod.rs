//! Renderer — pure mapping from studio state to HTML markup.
//!
//! DESIGN
//! ======
//! `render_page` assembles the whole studio UI (top bar, control sidebar,
//! device canvas, inspector) as a single document; `screen` renders the
//! component tree inside the device frame and `inspector` the edit panel for
//! the current selection. Rendering is synchronous and side-effect free:
//! state in, string out. Every rendered node carries `data-node-id`; a tiny
//! click-delegation script reports the innermost hit to `/select`, which
//! gives nested nodes stop-propagation semantics, and a click on the screen
//! background clears the selection.


pub mod inspector;
pub mod screen;

use crate::screen::NodeKind;
use crate::state::Studio;

/// Escape text for HTML element and attribute positions.
#[must_use]
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert a camelCase style key to its CSS property name.
#[must_use]
pub fn css_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Render the full studio page for the current state. `notice` is the
/// one-shot error banner taken from the studio before rendering.
#[must_use]
pub fn render_page(studio: &Studio, notice: Option<&str>) -> String {
    let palette = studio.theme.palette();
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>DesignFlow AI Studio</title>\n<style>");
    out.push_str(STYLESHEET);
    out.push_str("</style>\n</head>\n");
    out.push_str(&format!(
        "<body style=\"background-color:{};color:{}\">\n",
        palette.background, palette.text
    ));

    if let Some(notice) = notice {
        let escaped = html_escape(notice);
        out.push_str(&format!("<div class=\"alert\" role=\"alert\">{escaped}</div>\n"));
        out.push_str(&format!("<script>alert(\"{escaped}\");</script>\n"));
    }

    render_topbar(&mut out, studio);

    out.push_str("<div class=\"layout\">\n");
    render_sidebar(&mut out, studio);

    out.push_str("<main class=\"canvas\">\n");
    out.push_str(&screen::render_screen(&studio.screen, studio.selected.as_deref(), studio.theme));
    out.push_str("</main>\n");

    // Inspector only renders when the selection id resolves to a live node.
    if let Some(node) = studio.selected_node() {
        out.push_str(&inspector::render_inspector(node, studio.pending_edits.contains(&node.id)));
    }
    out.push_str("</div>\n");

    out.push_str(CLICK_SCRIPT);
    out.push_str("</body>\n</html>\n");
    out
}

fn render_topbar(out: &mut String, studio: &Studio) {
    let palette = studio.theme.palette();
    out.push_str(&format!("<header class=\"topbar\" style=\"background-color:{}\">\n", palette.surface));
    out.push_str("<h1>DesignFlow AI Studio</h1>\n<div class=\"topbar-actions\">\n");
    out.push_str("<form method=\"post\" action=\"/theme\"><button type=\"submit\" title=\"Toggle theme\">");
    out.push_str(match studio.theme {
        crate::theme::Theme::Dark => "Light mode",
        _ => "Dark mode",
    });
    out.push_str("</button></form>\n");
    out.push_str("<a class=\"export\" href=\"/export\">Export</a>\n");
    out.push_str("</div>\n</header>\n");
}

fn render_sidebar(out: &mut String, studio: &Studio) {
    let palette = studio.theme.palette();
    out.push_str(&format!("<aside class=\"sidebar\" style=\"background-color:{}\">\n", palette.surface));

    // Prompt section.
    out.push_str("<form method=\"post\" action=\"/generate\" class=\"section\">\n");
    out.push_str("<label>Describe your App</label>\n");
    out.push_str(&format!(
        "<textarea name=\"prompt\" placeholder=\"e.g. A meditation app home screen with a dark calm theme, \
         daily progress card, and list of sessions.\">{}</textarea>\n",
        html_escape(&studio.prompt)
    ));
    out.push_str(&format!(
        "<input name=\"brand_name\" placeholder=\"ZenFlow\" value=\"{}\">\n",
        html_escape(&studio.brand_name)
    ));
    out.push_str(&format!(
        "<input name=\"mood\" placeholder=\"Calm\" value=\"{}\">\n",
        html_escape(&studio.mood)
    ));
    if studio.generating {
        out.push_str("<button type=\"submit\" disabled>Thinking...</button>\n");
    } else {
        out.push_str("<button type=\"submit\">Generate UI</button>\n");
    }
    out.push_str("</form>\n");

    // Screenshot upload.
    out.push_str("<form method=\"post\" action=\"/screenshot\" enctype=\"multipart/form-data\" class=\"section\">\n");
    out.push_str("<label>Import Screenshot</label>\n");
    out.push_str("<input type=\"file\" name=\"file\" accept=\"image/*\">\n");
    out.push_str("<button type=\"submit\">Upload to Remix</button>\n");
    out.push_str("</form>\n");

    // Quick-add palette.
    out.push_str("<div class=\"section\">\n<label>Add Component</label>\n<div class=\"palette\">\n");
    for kind in QUICK_ADD_KINDS {
        out.push_str(&format!(
            "<form method=\"post\" action=\"/quick-add\"><input type=\"hidden\" name=\"kind\" value=\"{0}\">\
             <button type=\"submit\">+ {0}</button></form>\n",
            kind.label()
        ));
    }
    out.push_str("</div>\n</div>\n</aside>\n");
}

/// The fixed quick-add palette, in display order.
pub const QUICK_ADD_KINDS: [NodeKind; 6] = [
    NodeKind::Button,
    NodeKind::Card,
    NodeKind::Input,
    NodeKind::Header,
    NodeKind::Text,
    NodeKind::Image,
];

/// Innermost `data-node-id` wins, so a child click never bubbles to its
/// parent; anything else inside the screen background clears the selection.
const CLICK_SCRIPT: &str = "<script>\n\
document.addEventListener('click', function (e) {\n\
  var node = e.target.closest('[data-node-id]');\n\
  if (node) {\n\
    e.preventDefault();\n\
    window.location = '/select?id=' + encodeURIComponent(node.dataset.nodeId);\n\
    return;\n\
  }\n\
  if (e.target.closest('[data-role=\"screen-bg\"]')) {\n\
    window.location = '/select?id=';\n\
  }\n\
});\n\
</script>\n";

const STYLESHEET: &str = "\
body{margin:0;font-family:system-ui,sans-serif}\
.topbar{display:flex;justify-content:space-between;align-items:center;padding:0 24px;height:64px}\
.topbar h1{font-size:18px;margin:0}\
.topbar-actions{display:flex;gap:12px;align-items:center}\
.layout{display:flex;height:calc(100vh - 64px)}\
.sidebar{width:320px;padding:24px;overflow-y:auto;display:flex;flex-direction:column;gap:24px}\
.section{display:flex;flex-direction:column;gap:8px}\
.section label{font-size:11px;font-weight:600;text-transform:uppercase;letter-spacing:.08em;opacity:.7}\
.section textarea{height:96px;resize:none}\
.palette{display:grid;grid-template-columns:1fr 1fr;gap:8px}\
.canvas{flex:1;display:flex;justify-content:center;align-items:center;overflow:hidden}\
.device-frame{position:relative;width:375px;height:812px;background:#000;border-radius:40px;\
border:8px solid #1f2937;overflow:hidden}\
.device-notch{position:absolute;top:0;left:50%;transform:translateX(-50%);width:160px;height:28px;\
background:#000;border-radius:0 0 16px 16px;z-index:50}\
.device-home{position:absolute;bottom:4px;left:50%;transform:translateX(-50%);width:128px;height:4px;\
background:rgba(255,255,255,.2);border-radius:2px;z-index:50}\
.screen-content{width:100%;height:100%;overflow-y:auto;padding:40px 16px 32px;box-sizing:border-box;\
display:flex;flex-direction:column;gap:16px}\
.node{cursor:pointer}\
.node img{width:100%;height:100%;object-fit:cover;display:block}\
.node-image{position:relative;overflow:hidden}\
.image-hint{position:absolute;inset:0;display:flex;justify-content:center;align-items:center;\
background:rgba(0,0,0,.4);color:#fff;font-size:12px}\
.inspector{width:320px;padding:24px;overflow-y:auto;display:flex;flex-direction:column;gap:16px;\
background:#0f172a;color:#f8fafc;border-left:1px solid rgba(255,255,255,.1)}\
.inspector h2{margin:0;font-size:18px;display:flex;justify-content:space-between}\
.alert{background:#7f1d1d;color:#fecaca;padding:12px 24px}\
";
