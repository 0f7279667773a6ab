use super::*;

fn node(id: &str, kind: NodeKind) -> ScreenNode {
    ScreenNode {
        id: id.into(),
        kind,
        content: None,
        src: None,
        style: serde_json::json!({}),
        props: None,
        children: None,
    }
}

/// Screen with a nested Card: top-level a, card(b, c), d.
fn nested_screen() -> Screen {
    let mut card = node("card", NodeKind::Card);
    card.children = Some(vec![node("b", NodeKind::Text), node("c", NodeKind::Button)]);
    Screen {
        id: "s1".into(),
        name: "Home".into(),
        background_color: "#111111".into(),
        components: vec![node("a", NodeKind::Header), card, node("d", NodeKind::Image)],
    }
}

#[test]
fn find_node_top_level() {
    let screen = nested_screen();
    assert_eq!(screen.find_node("a").unwrap().kind, NodeKind::Header);
    assert_eq!(screen.find_node("d").unwrap().kind, NodeKind::Image);
}

#[test]
fn find_node_nested_child() {
    let screen = nested_screen();
    assert_eq!(screen.find_node("c").unwrap().kind, NodeKind::Button);
}

#[test]
fn find_node_absent() {
    let screen = nested_screen();
    assert!(screen.find_node("nope").is_none());
}

#[test]
fn replace_node_preserves_shape_and_order() {
    let mut screen = nested_screen();
    let before = screen.clone();

    let mut replacement = node("c", NodeKind::Button);
    replacement.content = Some("Buy now".into());
    assert!(screen.replace_node("c", replacement.clone()));

    // The replaced node is structurally equal to the replacement.
    assert_eq!(screen.find_node("c").unwrap(), &replacement);

    // Everything else — ids, order, nesting — is untouched.
    assert_eq!(screen.node_count(), before.node_count());
    let ids: Vec<&str> = screen.components.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "card", "d"]);
    let child_ids: Vec<&str> = screen.components[1]
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(child_ids, vec!["b", "c"]);
    assert_eq!(screen.find_node("a"), before.find_node("a"));
    assert_eq!(screen.find_node("b"), before.find_node("b"));
    assert_eq!(screen.find_node("d"), before.find_node("d"));
}

#[test]
fn replace_node_absent_is_noop() {
    let mut screen = nested_screen();
    let before = screen.clone();
    assert!(!screen.replace_node("nope", node("nope", NodeKind::Text)));
    assert_eq!(screen, before);
}

#[test]
fn node_count_includes_nested() {
    assert_eq!(nested_screen().node_count(), 5);
}

#[test]
fn unknown_kind_round_trips() {
    let raw = r#"{"id":"x","type":"Carousel","style":{"gap":"8px"}}"#;
    let parsed: ScreenNode = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.kind, NodeKind::Other("Carousel".into()));

    let out = serde_json::to_value(&parsed).unwrap();
    assert_eq!(out["type"], "Carousel");
    // Unknown style keys pass through untouched.
    assert_eq!(out["style"]["gap"], "8px");
}

#[test]
fn style_accessor_reads_known_keys() {
    let style = serde_json::json!({
        "color": "#fff",
        "backgroundColor": "#6366f1",
        "padding": "16px",
        "borderRadius": "12px",
        "fontSize": "14px",
        "somethingNew": "kept",
    });
    let style = Style::new(&style);
    assert_eq!(style.color(), Some("#fff"));
    assert_eq!(style.background_color(), Some("#6366f1"));
    assert_eq!(style.padding(), Some("16px"));
    assert_eq!(style.border_radius(), Some("12px"));
    assert_eq!(style.font_size(), Some("14px"));
    assert_eq!(style.get("somethingNew"), Some("kept"));

    let keys: Vec<&str> = style.entries().map(|(k, _)| k).collect();
    assert_eq!(keys[0], "color", "insertion order preserved");
}

#[test]
fn set_style_key_merges() {
    let mut n = node("a", NodeKind::Button);
    n.set_style_key("padding", "8px");
    n.set_style_key("padding", "10px");
    n.set_style_key("color", "#000");
    assert_eq!(n.style().padding(), Some("10px"));
    assert_eq!(n.style().color(), Some("#000"));
}

#[test]
fn bootstrap_screen_matches_fixed_default() {
    let screen = bootstrap_screen();
    assert_eq!(screen.background_color, "#0f172a");
    assert_eq!(screen.components.len(), 4);

    let header = &screen.components[0];
    assert_eq!(header.kind, NodeKind::Header);
    assert_eq!(header.content.as_deref(), Some("Welcome to DesignFlow"));

    assert_eq!(screen.components[1].kind, NodeKind::Text);

    let img = &screen.components[2];
    assert_eq!(img.kind, NodeKind::Image);
    assert_eq!(img.src.as_deref(), Some("https://picsum.photos/400/300"));

    let button = &screen.components[3];
    assert_eq!(button.kind, NodeKind::Button);
    assert_eq!(button.content.as_deref(), Some("Get Started"));
}

#[test]
fn quick_add_card_defaults() {
    let n = quick_add_node(NodeKind::Card);
    assert_eq!(n.kind, NodeKind::Card);
    assert_eq!(n.content.as_deref(), Some("New Card"));
    assert_eq!(n.style().padding(), Some("12px"));
    assert_eq!(n.style().get("margin"), Some("4px 0"));
    assert!(n.children.is_none());
}

#[test]
fn quick_add_ids_are_unique() {
    let a = quick_add_node(NodeKind::Button);
    let b = quick_add_node(NodeKind::Button);
    assert_ne!(a.id, b.id);
}
