use folio_core::{
    select, Element, ElementId, Page, PageController, PageEvent, Rect, ScrollBehavior, Selector,
    Viewport,
};

struct Fixture {
    controller: PageController,
    nav_links: Vec<ElementId>,
    sections: Vec<ElementId>,
}

fn fixture_sized(width: f64, height: f64) -> Fixture {
    fixture_with_first_section_at(0.0, width, height)
}

fn fixture_with_first_section_at(first_top: f64, width: f64, height: f64) -> Fixture {
    let mut page = Page::new(Viewport::new(width, height));
    let body = page.body();

    let nav = page
        .append(
            body,
            Element::new("nav").with_layout(Rect::new(0.0, 0.0, width, 60.0)),
        )
        .unwrap();
    let mut nav_links = Vec::new();
    for (href, label) in [
        ("#intro", "Introduction"),
        ("#why-me", "Why Me"),
        ("#together", "What We Can Do"),
    ] {
        let link = page
            .append(
                nav,
                Element::new("a")
                    .with_class("nav-link")
                    .with_href(href)
                    .with_text(label),
            )
            .unwrap();
        nav_links.push(link);
    }

    let mut sections = Vec::new();
    let mut top = first_top;
    for (dom_id, height_px) in [("intro", 900.0), ("why-me", 1000.0), ("together", 1100.0)] {
        let section = page
            .append(
                body,
                Element::new("section")
                    .with_dom_id(dom_id)
                    .with_class("section")
                    .with_layout(Rect::new(0.0, top, width, height_px)),
            )
            .unwrap();
        sections.push(section);
        top += height_px;
    }

    Fixture {
        controller: PageController::new(page),
        nav_links,
        sections,
    }
}

fn active_states(fx: &Fixture) -> Vec<bool> {
    fx.nav_links
        .iter()
        .map(|id| fx.controller.page().element(*id).unwrap().has_class("active"))
        .collect()
}

#[test]
fn start_highlights_the_section_at_the_reference_point() {
    let mut fx = fixture_sized(1200.0, 800.0);
    fx.controller.start();
    assert_eq!(active_states(&fx), vec![true, false, false]);
}

#[test]
fn highlight_updates_on_the_next_frame_after_scroll() {
    let mut fx = fixture_sized(1200.0, 800.0);
    fx.controller.start();

    fx.controller.dispatch(PageEvent::Scroll { top: 1000.0 });
    // Recomputation is frame work; nothing changes at the event itself.
    assert_eq!(active_states(&fx), vec![true, false, false]);

    fx.controller.advance(16);
    assert_eq!(active_states(&fx), vec![false, true, false]);
}

#[test]
fn rapid_scrolls_apply_only_the_final_position() {
    let mut fx = fixture_sized(1200.0, 800.0);
    fx.controller.start();

    fx.controller.dispatch(PageEvent::Scroll { top: 1000.0 });
    fx.controller.dispatch(PageEvent::Scroll { top: 2000.0 });
    fx.controller.advance(16);

    assert_eq!(active_states(&fx), vec![false, false, true]);
}

#[test]
fn reference_point_sits_a_third_into_the_viewport() {
    let mut fx = fixture_sized(1200.0, 800.0);
    fx.controller.start();

    // 633 + 800/3 is still inside #intro; one pixel more crosses into
    // #why-me at 900.
    fx.controller.dispatch(PageEvent::Scroll { top: 633.0 });
    fx.controller.advance(16);
    assert_eq!(active_states(&fx), vec![true, false, false]);

    fx.controller.dispatch(PageEvent::Scroll { top: 634.0 });
    fx.controller.advance(16);
    assert_eq!(active_states(&fx), vec![false, true, false]);
}

#[test]
fn no_containing_section_keeps_the_previous_highlight() {
    let mut fx = fixture_with_first_section_at(300.0, 1200.0, 800.0);
    fx.controller.start();
    // The reference point starts above every section.
    assert_eq!(active_states(&fx), vec![false, false, false]);

    fx.controller.dispatch(PageEvent::Scroll { top: 100.0 });
    fx.controller.advance(16);
    assert_eq!(active_states(&fx), vec![true, false, false]);

    fx.controller.dispatch(PageEvent::Scroll { top: 0.0 });
    fx.controller.advance(16);
    assert_eq!(active_states(&fx), vec![true, false, false]);
}

#[test]
fn anchor_click_jumps_to_the_section_top_on_wide_viewports() {
    let mut fx = fixture_sized(800.0, 600.0);
    fx.controller.start();

    fx.controller.dispatch(PageEvent::Click {
        target: fx.nav_links[2],
    });

    let section_top = fx
        .controller
        .page()
        .element(fx.sections[2])
        .unwrap()
        .layout
        .top;
    assert_eq!(fx.controller.page().scroll_y(), section_top);
    let request = fx.controller.page().last_scroll_request().unwrap();
    assert_eq!(request.top, 1900.0);
    assert_eq!(request.behavior, ScrollBehavior::Smooth);
}

#[test]
fn anchor_click_offsets_by_twenty_on_narrow_viewports() {
    let mut fx = fixture_sized(500.0, 700.0);
    fx.controller.start();

    fx.controller.dispatch(PageEvent::Click {
        target: fx.nav_links[2],
    });

    assert_eq!(fx.controller.page().scroll_y(), 1880.0);
    let request = fx.controller.page().last_scroll_request().unwrap();
    assert_eq!(request.top, 1880.0);
    assert_eq!(request.behavior, ScrollBehavior::Smooth);
}

#[test]
fn clicks_on_nested_content_bubble_to_the_anchor() {
    let mut fx = fixture_sized(1200.0, 800.0);
    fx.controller.start();

    let span = fx
        .controller
        .page_mut()
        .append(fx.nav_links[1], Element::new("span").with_text("Why Me"))
        .unwrap();
    fx.controller.dispatch(PageEvent::Click { target: span });

    assert_eq!(fx.controller.page().scroll_y(), 900.0);
}

#[test]
fn unknown_and_bare_fragments_are_ignored() {
    let mut fx = fixture_sized(1200.0, 800.0);
    fx.controller.start();
    let body = fx.controller.page().body();

    let dead = fx
        .controller
        .page_mut()
        .append(body, Element::new("a").with_href("#missing"))
        .unwrap();
    let bare = fx
        .controller
        .page_mut()
        .append(body, Element::new("a").with_href("#"))
        .unwrap();

    fx.controller.dispatch(PageEvent::Click { target: dead });
    fx.controller.dispatch(PageEvent::Click { target: bare });

    assert_eq!(fx.controller.page().scroll_y(), 0.0);
    assert!(fx.controller.page().last_scroll_request().is_none());
}

#[test]
fn menu_links_follow_the_same_highlight() {
    let mut fx = fixture_sized(500.0, 700.0);
    fx.controller.start();

    fx.controller.dispatch(PageEvent::Scroll { top: 1200.0 });
    fx.controller.advance(16);
    assert_eq!(active_states(&fx), vec![false, true, false]);

    let menu_links = select(
        fx.controller.page(),
        &Selector::parse(".mobile-menu-link").unwrap(),
    );
    // Three section links plus the two contact links.
    assert_eq!(menu_links.len(), 5);
    let lit: Vec<bool> = menu_links
        .iter()
        .map(|id| fx.controller.page().element(*id).unwrap().has_class("active"))
        .collect();
    assert_eq!(lit, vec![false, true, false, false, false]);
}
