//! Screen document model: the mobile mockup and its component tree.
//!
//! DESIGN
//! ======
//! A `Screen` is an ordered tree of typed `ScreenNode`s. Node `style` and
//! `props` are open-ended JSON bags so AI-generated fields pass through
//! untouched; `Style` gives typed access to the well-known keys. Node ids are
//! the sole join key between rendered click targets and editor state, so the
//! only structural queries are "find by id" and "replace by id" — both walk
//! nested children and preserve sibling order.
//!
//! Data flows into this layer from the Gemini gateway (JSON deserialization)
//! and from the persisted state blob. The renderer reads it via `components`
//! in insertion order, which is display order.

#[cfg(test)]
#[path = "screen_test.rs"]
mod screen_test;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

/// Fallback image for `Image` nodes without a `src`.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://picsum.photos/400/200";

// =============================================================================
// NODE KIND
// =============================================================================

/// The kind of a screen node. Unrecognized kind strings (future AI output)
/// are preserved round-trip in `Other` and render via the generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Button,
    Card,
    Input,
    Header,
    Text,
    Image,
    Navbar,
    List,
    Other(String),
}

impl NodeKind {
    /// Wire/display name of this kind.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Button => "Button",
            Self::Card => "Card",
            Self::Input => "Input",
            Self::Header => "Header",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Navbar => "Navbar",
            Self::List => "List",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for NodeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Button" => Self::Button,
            "Card" => Self::Card,
            "Input" => Self::Input,
            "Header" => Self::Header,
            "Text" => Self::Text,
            "Image" => Self::Image,
            "Navbar" => Self::Navbar,
            "List" => Self::List,
            _ => Self::Other(raw),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.label().to_owned()
    }
}

// =============================================================================
// SCREEN NODE
// =============================================================================

/// One visual element in the mockup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenNode {
    /// Unique within the screen's full node set, including nested children.
    pub id: String,
    /// Dispatch discriminant for the renderer.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Text content (button label, paragraph body, input placeholder).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Image source: external URL or inline `data:` payload. Both render identically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Open-ended visual properties. Unknown keys are passed through to the renderer.
    #[serde(default = "empty_object")]
    pub style: Value,
    /// Open-ended kind-specific data (e.g. a title for Card/Navbar).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,
    /// Ordered children; only meaningful for container kinds such as Card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ScreenNode>>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ScreenNode {
    /// Typed access to the well-known style keys.
    #[must_use]
    pub fn style(&self) -> Style<'_> {
        Style::new(&self.style)
    }

    /// Title from `props`, for Card/Navbar headings.
    #[must_use]
    pub fn prop_title(&self) -> Option<&str> {
        self.props.as_ref()?.get("title")?.as_str()
    }

    /// Merge one style key into the open bag, replacing any previous value.
    pub fn set_style_key(&mut self, key: &str, value: &str) {
        if !self.style.is_object() {
            self.style = empty_object();
        }
        if let Some(map) = self.style.as_object_mut() {
            map.insert(key.to_owned(), Value::String(value.to_owned()));
        }
    }
}

// =============================================================================
// STYLE ACCESSOR
// =============================================================================

/// Typed access to common style fields from a node's open `style` JSON value.
pub struct Style<'a> {
    value: &'a Value,
}

impl<'a> Style<'a> {
    /// Wrap a reference to a `style` JSON value for typed access.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Raw lookup of any style key as a string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.value.get(key)?.as_str()
    }

    /// Text color.
    #[must_use]
    pub fn color(&self) -> Option<&'a str> {
        self.get("color")
    }

    /// Background color.
    #[must_use]
    pub fn background_color(&self) -> Option<&'a str> {
        self.get("backgroundColor")
    }

    /// Padding, as a CSS length string.
    #[must_use]
    pub fn padding(&self) -> Option<&'a str> {
        self.get("padding")
    }

    /// Border radius, as a CSS length string.
    #[must_use]
    pub fn border_radius(&self) -> Option<&'a str> {
        self.get("borderRadius")
    }

    /// Font size, as a CSS length string.
    #[must_use]
    pub fn font_size(&self) -> Option<&'a str> {
        self.get("fontSize")
    }

    /// All entries in insertion order, string values only.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.value
            .as_object()
            .into_iter()
            .flatten()
            .filter_map(|(k, v)| Some((k.as_str(), v.as_str()?)))
    }
}

// =============================================================================
// SCREEN
// =============================================================================

/// The full mobile-mockup document: background + ordered component tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "backgroundColor", default)]
    pub background_color: String,
    #[serde(default)]
    pub components: Vec<ScreenNode>,
}

impl Screen {
    /// Find a node by id anywhere in the tree, including nested children.
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&ScreenNode> {
        find_in(&self.components, id)
    }

    /// Replace the node with `id` by value, preserving tree shape and the
    /// position and order of every other node. Returns false if absent.
    pub fn replace_node(&mut self, id: &str, replacement: ScreenNode) -> bool {
        replace_in(&mut self.components, id, replacement)
    }

    /// Whether any node in the tree carries `id`.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Total node count, nested children included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        count_in(&self.components)
    }
}

fn find_in<'a>(nodes: &'a [ScreenNode], id: &str) -> Option<&'a ScreenNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = &node.children {
            if let Some(found) = find_in(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn replace_in(nodes: &mut [ScreenNode], id: &str, replacement: ScreenNode) -> bool {
    for node in nodes {
        if node.id == id {
            *node = replacement;
            return true;
        }
        if let Some(children) = &mut node.children {
            if replace_in(children, id, replacement.clone()) {
                return true;
            }
        }
    }
    false
}

fn count_in(nodes: &[ScreenNode]) -> usize {
    nodes
        .iter()
        .map(|n| 1 + n.children.as_deref().map_or(0, count_in))
        .sum()
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Fresh unique node id.
#[must_use]
pub fn fresh_node_id() -> String {
    format!("node_{}", Uuid::new_v4().simple())
}

/// Fresh screen id stamped with the current unix-ms time.
#[must_use]
pub fn fresh_screen_id() -> String {
    let ms = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("screen_{ms}")
}

/// A quick-add node: fixed default content and spacing for the chosen kind.
#[must_use]
pub fn quick_add_node(kind: NodeKind) -> ScreenNode {
    ScreenNode {
        id: fresh_node_id(),
        content: Some(format!("New {}", kind.label())),
        kind,
        src: None,
        style: json!({ "padding": "12px", "margin": "4px 0" }),
        props: None,
        children: None,
    }
}

/// The fixed bootstrap screen shown before any generation or restore.
#[must_use]
pub fn bootstrap_screen() -> Screen {
    Screen {
        id: "initial_screen".into(),
        name: "Start".into(),
        background_color: "#0f172a".into(),
        components: vec![
            ScreenNode {
                id: "h1".into(),
                kind: NodeKind::Header,
                content: Some("Welcome to DesignFlow".into()),
                src: None,
                style: json!({
                    "color": "#ffffff",
                    "fontSize": "24px",
                    "fontWeight": "bold",
                    "margin": "20px 0",
                    "textAlign": "center",
                }),
                props: None,
                children: None,
            },
            ScreenNode {
                id: "p1".into(),
                kind: NodeKind::Text,
                content: Some("Enter a prompt to generate your mobile UI instantly.".into()),
                src: None,
                style: json!({
                    "color": "#94a3b8",
                    "fontSize": "16px",
                    "margin": "0 20px 20px 20px",
                    "textAlign": "center",
                    "lineHeight": "1.5",
                }),
                props: None,
                children: None,
            },
            ScreenNode {
                id: "img1".into(),
                kind: NodeKind::Image,
                content: None,
                src: Some("https://picsum.photos/400/300".into()),
                style: json!({
                    "width": "100%",
                    "height": "200px",
                    "borderRadius": "16px",
                    "margin": "0 0 20px 0",
                    "objectFit": "cover",
                }),
                props: None,
                children: None,
            },
            ScreenNode {
                id: "btn1".into(),
                kind: NodeKind::Button,
                content: Some("Get Started".into()),
                src: None,
                style: json!({
                    "backgroundColor": "#6366f1",
                    "color": "#fff",
                    "padding": "16px",
                    "borderRadius": "12px",
                    "textAlign": "center",
                    "fontWeight": "600",
                }),
                props: None,
                children: None,
            },
        ],
    }
}
