use super::*;
use serde_json::json;

fn node(id: &str, kind: NodeKind) -> ScreenNode {
    ScreenNode {
        id: id.into(),
        kind,
        content: Some(format!("content of {id}")),
        src: None,
        style: json!({}),
        props: None,
        children: None,
    }
}

fn screen_with(components: Vec<ScreenNode>) -> Screen {
    Screen { id: "s".into(), name: "Test".into(), background_color: "#101010".into(), components }
}

fn marker(id: &str) -> String {
    format!("data-node-id=\"{id}\"")
}

#[test]
fn renders_every_descendant_exactly_once_in_document_order() {
    let mut card = node("card", NodeKind::Card);
    card.children = Some(vec![node("child1", NodeKind::Text), node("child2", NodeKind::Button)]);
    let mut inner = node("inner-card", NodeKind::Card);
    inner.children = Some(vec![node("deep", NodeKind::Image)]);
    card.children.as_mut().unwrap().push(inner);

    let screen = screen_with(vec![node("first", NodeKind::Header), card, node("last", NodeKind::Text)]);
    let html = render_screen(&screen, None, Theme::Dark);

    let ids = ["first", "card", "child1", "child2", "inner-card", "deep", "last"];
    let mut last_pos = 0;
    for id in ids {
        let m = marker(id);
        assert_eq!(html.matches(&m).count(), 1, "{id} rendered exactly once");
        let pos = html.find(&m).unwrap();
        assert!(pos > last_pos, "{id} out of document order");
        last_pos = pos;
    }
}

#[test]
fn selected_node_is_outlined() {
    let screen = screen_with(vec![node("a", NodeKind::Button), node("b", NodeKind::Button)]);
    let html = render_screen(&screen, Some("b"), Theme::Dark);

    let b_start = html.find(&marker("b")).unwrap();
    let b_tag = &html[b_start..html[b_start..].find('>').unwrap() + b_start];
    assert!(b_tag.contains("outline:2px solid #a855f7"));

    let a_start = html.find(&marker("a")).unwrap();
    let a_tag = &html[a_start..html[a_start..].find('>').unwrap() + a_start];
    assert!(!a_tag.contains("outline:"));
}

#[test]
fn selection_of_absent_id_renders_nothing_selected() {
    let screen = screen_with(vec![node("a", NodeKind::Button)]);
    let html = render_screen(&screen, Some("ghost"), Theme::Dark);
    assert!(!html.contains("outline:2px solid"));
}

#[test]
fn image_without_src_uses_placeholder() {
    let mut img = node("img", NodeKind::Image);
    img.src = None;
    let html = render_screen(&screen_with(vec![img]), None, Theme::Dark);
    assert!(html.contains(&format!("src=\"{PLACEHOLDER_IMAGE_URL}\"")));
}

#[test]
fn image_url_and_inline_payload_render_identically() {
    let mut remote = node("img", NodeKind::Image);
    remote.src = Some("https://example.test/pic.jpg".into());
    let remote_html = render_screen(&screen_with(vec![remote]), None, Theme::Dark);
    assert!(remote_html.contains("src=\"https://example.test/pic.jpg\""));

    let mut inline = node("img", NodeKind::Image);
    inline.src = Some("data:image/png;base64,QUJD".into());
    let inline_html = render_screen(&screen_with(vec![inline]), None, Theme::Dark);
    assert!(inline_html.contains("src=\"data:image/png;base64,QUJD\""));

    // Same markup shape either way, only the src differs.
    assert_eq!(
        remote_html.replace("https://example.test/pic.jpg", "X"),
        inline_html.replace("data:image/png;base64,QUJD", "X")
    );
}

#[test]
fn selected_image_shows_edit_hint() {
    let mut img = node("img", NodeKind::Image);
    img.src = Some("data:image/png;base64,QUJD".into());
    let html = render_screen(&screen_with(vec![img.clone()]), Some("img"), Theme::Dark);
    assert!(html.contains("Select to Edit AI"));

    let unselected = render_screen(&screen_with(vec![img]), None, Theme::Dark);
    assert!(!unselected.contains("Select to Edit AI"));
}

#[test]
fn input_renders_readonly_with_placeholder() {
    let html = render_screen(&screen_with(vec![node("in", NodeKind::Input)]), None, Theme::Dark);
    assert!(html.contains("placeholder=\"content of in\""));
    assert!(html.contains("readonly"));
}

#[test]
fn card_without_children_renders_fallback_title() {
    let card = node("card", NodeKind::Card);
    let html = render_screen(&screen_with(vec![card]), None, Theme::Dark);
    assert!(html.contains("<h3>Card Title</h3>"));
    assert!(html.contains("content of card"));
}

#[test]
fn card_title_comes_from_props() {
    let mut card = node("card", NodeKind::Card);
    card.props = Some(json!({ "title": "Sessions" }));
    let html = render_screen(&screen_with(vec![card]), None, Theme::Dark);
    assert!(html.contains("<h3>Sessions</h3>"));
}

#[test]
fn navbar_renders_default_title_and_icons() {
    let mut navbar = node("nav", NodeKind::Navbar);
    navbar.props = None;
    let html = render_screen(&screen_with(vec![navbar]), None, Theme::Dark);
    assert!(html.contains(">App</span>"));
    assert_eq!(html.matches("navbar-icon").count(), 2);
}

#[test]
fn list_and_unknown_kinds_fall_back_to_generic_block() {
    let list = node("list", NodeKind::List);
    let other = node("x", NodeKind::Other("Carousel".into()));
    let html = render_screen(&screen_with(vec![list, other]), None, Theme::Dark);
    assert!(html.contains("content of list"));
    assert!(html.contains("content of x"));
}

#[test]
fn style_keys_are_kebab_cased_and_unknown_keys_pass_through() {
    let mut button = node("b", NodeKind::Button);
    button.style = json!({ "backgroundColor": "#6366f1", "weirdNewKey": "7" });
    let html = render_screen(&screen_with(vec![button]), None, Theme::Dark);
    assert!(html.contains("background-color:#6366f1;"));
    assert!(html.contains("weird-new-key:7;"));
}

#[test]
fn content_is_html_escaped() {
    let mut text = node("t", NodeKind::Text);
    text.content = Some("<script>alert(1)</script>".into());
    let html = render_screen(&screen_with(vec![text]), None, Theme::Dark);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn background_click_target_carries_screen_color() {
    let html = render_screen(&screen_with(vec![]), None, Theme::Dark);
    assert!(html.contains("data-role=\"screen-bg\""));
    assert!(html.contains("background-color:#101010"));
}

#[test]
fn empty_background_falls_back_to_theme() {
    let mut screen = screen_with(vec![]);
    screen.background_color = String::new();
    let html = render_screen(&screen, None, Theme::Amoled);
    assert!(html.contains("background-color:#000000"));
}
