use folio_core::{Element, Page, Rect, ScrollBehavior, ScrollRequest, Viewport};

#[test]
fn element_serialization_uses_expected_wire_fields() {
    let mut element = Element::new("a")
        .with_dom_id("contact")
        .with_href("#together")
        .with_link_target("_blank")
        .with_class("mobile-menu-link")
        .with_text("Let's build together")
        .with_layout(Rect::new(40.0, 520.0, 280.0, 44.0));
    element
        .style_mut()
        .set_property("color", "var(--accent-primary)");

    let json = serde_json::to_value(&element).unwrap();
    assert_eq!(json["tag"], "a");
    assert_eq!(json["dom_id"], "contact");
    assert_eq!(json["href"], "#together");
    assert_eq!(json["link_target"], "_blank");
    assert_eq!(json["classes"], serde_json::json!(["mobile-menu-link"]));
    assert_eq!(json["style"]["color"], "var(--accent-primary)");
    assert_eq!(json["text"], "Let's build together");
    assert_eq!(json["layout"]["left"], 40.0);
    assert_eq!(json["layout"]["top"], 520.0);
    assert_eq!(json["layout"]["width"], 280.0);
    assert_eq!(json["layout"]["height"], 44.0);
    assert_eq!(json["parent"], serde_json::Value::Null);
    assert_eq!(json["children"], serde_json::json!([]));

    let decoded: Element = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, element);
}

#[test]
fn element_deserializes_from_wire_json() {
    let value = serde_json::json!({
        "tag": "li",
        "dom_id": null,
        "href": null,
        "link_target": null,
        "classes": ["checked", "todo-item"],
        "style": { "animation-play-state": "paused" },
        "text": "Ship the first release",
        "layout": { "left": 200.0, "top": 2100.0, "width": 800.0, "height": 100.0 },
        "parent": null,
        "children": []
    });

    let element: Element = serde_json::from_value(value).unwrap();
    assert_eq!(element.tag, "li");
    assert!(element.has_class("todo-item"));
    assert!(element.has_class("checked"));
    assert_eq!(
        element.style().property("animation-play-state"),
        Some("paused")
    );
    assert_eq!(element.text(), "Ship the first release");
    assert_eq!(element.layout, Rect::new(200.0, 2100.0, 800.0, 100.0));
    assert_eq!(element.parent(), None);
    assert!(element.children().is_empty());
}

#[test]
fn scroll_request_serialization_uses_snake_case_behavior() {
    let request = ScrollRequest {
        top: 880.0,
        behavior: ScrollBehavior::Smooth,
    };

    let json = serde_json::to_value(request).unwrap();
    assert_eq!(json["top"], 880.0);
    assert_eq!(json["behavior"], "smooth");

    let decoded: ScrollRequest = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, request);

    let auto = serde_json::to_value(ScrollRequest {
        top: 0.0,
        behavior: ScrollBehavior::Auto,
    })
    .unwrap();
    assert_eq!(auto["behavior"], "auto");
}

#[test]
fn element_ids_serialize_as_bare_numbers() {
    let mut page = Page::new(Viewport::new(1200.0, 800.0));
    let body = page.body();
    let id = page.append(body, Element::new("div")).unwrap();

    assert_eq!(serde_json::to_value(id).unwrap(), 1_u64);
    assert_eq!(id.to_string(), "e1");
}
