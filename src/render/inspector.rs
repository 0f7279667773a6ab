//! Inspector markup: the edit panel for the selected node.

#[cfg(test)]
#[path = "inspector_test.rs"]
mod inspector_test;

use super::html_escape;
use crate::screen::{NodeKind, ScreenNode};

/// Render the inspector for a resolved selection. Each field is its own form
/// posting a full-node patch; there is no draft state beyond the AI edit
/// prompt text. `pending_edit` disables the edit submit while one is in flight.
#[must_use]
pub fn render_inspector(node: &ScreenNode, pending_edit: bool) -> String {
    let mut out = String::with_capacity(4 * 1024);
    out.push_str("<aside class=\"inspector\">\n");
    out.push_str(&format!(
        "<h2>Edit {} <a class=\"close\" href=\"/select?id=\" title=\"Close\">&times;</a></h2>\n",
        html_escape(node.kind.label())
    ));

    if node.kind != NodeKind::Image {
        render_content_field(&mut out, node);
    } else {
        render_image_editor(&mut out, pending_edit);
    }

    render_style_fields(&mut out, node);
    out.push_str("</aside>\n");
    out
}

fn render_content_field(out: &mut String, node: &ScreenNode) {
    out.push_str("<form method=\"post\" action=\"/inspector/content\" class=\"section\">\n");
    out.push_str("<label>Content</label>\n");
    out.push_str(&format!(
        "<textarea name=\"value\" rows=\"3\">{}</textarea>\n",
        html_escape(node.content.as_deref().unwrap_or(""))
    ));
    out.push_str("<button type=\"submit\">Apply</button>\n</form>\n");
}

fn render_image_editor(out: &mut String, pending_edit: bool) {
    out.push_str("<form method=\"post\" action=\"/inspector/image-edit\" class=\"section image-editor\">\n");
    out.push_str("<label>AI Image Editor</label>\n");
    out.push_str(
        "<textarea name=\"prompt\" placeholder=\"E.g., Add a retro filter, make it sunset...\"></textarea>\n",
    );
    if pending_edit {
        out.push_str("<button type=\"submit\" disabled>Editing...</button>\n");
    } else {
        out.push_str("<button type=\"submit\">Generate Edit</button>\n");
    }
    out.push_str("</form>\n");
}

/// The fixed controllable style fields: (label, style key, input type).
const STYLE_FIELDS: [(&str, &str, StyleInput); 5] = [
    ("Color", "color", StyleInput::Color),
    ("Background", "backgroundColor", StyleInput::Color),
    ("Padding", "padding", StyleInput::Text("e.g. 16px")),
    ("Border Radius", "borderRadius", StyleInput::Text("e.g. 8px")),
    ("Font Size", "fontSize", StyleInput::Text("e.g. 14px")),
];

#[derive(Clone, Copy)]
enum StyleInput {
    Color,
    Text(&'static str),
}

fn render_style_fields(out: &mut String, node: &ScreenNode) {
    out.push_str("<div class=\"section\">\n<label>Styles</label>\n");
    for (label, key, input) in STYLE_FIELDS {
        let current = node.style().get(key).unwrap_or("");
        out.push_str("<form method=\"post\" action=\"/inspector/style\" class=\"style-field\">\n");
        out.push_str(&format!("<input type=\"hidden\" name=\"key\" value=\"{key}\">\n"));
        match input {
            StyleInput::Color => {
                // Color pickers need a concrete value; fall back to white.
                let value = if current.is_empty() { "#ffffff" } else { current };
                out.push_str(&format!(
                    "<label>{label}</label><input type=\"color\" name=\"value\" value=\"{}\" \
                     onchange=\"this.form.submit()\">\n",
                    html_escape(value)
                ));
            }
            StyleInput::Text(hint) => {
                out.push_str(&format!(
                    "<label>{label}</label><input type=\"text\" name=\"value\" value=\"{}\" \
                     placeholder=\"{hint}\">\n",
                    html_escape(current)
                ));
            }
        }
        out.push_str("<button type=\"submit\">Apply</button>\n</form>\n");
    }
    out.push_str("</div>\n");
}
