use folio_core::{Element, ElementId, Page, PageController, PageEvent, Rect, Viewport};

// The intro block sits below the fold so reveal timers never mix into the
// typing timeline; on narrow viewports that also proves the forced reveal.
fn fixture(width: f64, height: f64, subtitle_text: &str) -> (PageController, ElementId, ElementId) {
    let mut page = Page::new(Viewport::new(width, height));
    let body = page.body();
    let intro = page
        .append(
            body,
            Element::new("div")
                .with_class("intro-content")
                .with_layout(Rect::new(100.0, 2000.0, 1000.0, 300.0)),
        )
        .unwrap();
    let subtitle = page
        .append(
            intro,
            Element::new("p")
                .with_class("intro-subtitle")
                .with_text(subtitle_text)
                .with_layout(Rect::new(100.0, 2100.0, 1000.0, 40.0)),
        )
        .unwrap();
    page.append(
        body,
        Element::new("div").with_layout(Rect::new(0.0, 2300.0, width, 700.0)),
    )
    .unwrap();
    (PageController::new(page), intro, subtitle)
}

fn text(controller: &PageController, id: ElementId) -> String {
    controller
        .page()
        .element(id)
        .unwrap()
        .text()
        .to_string()
}

#[test]
fn wide_viewport_captures_and_clears_the_subtitle() {
    let (mut controller, _, subtitle) = fixture(1200.0, 800.0, "Hello, world");
    controller.start();
    assert_eq!(text(&controller, subtitle), "");
}

#[test]
fn first_character_lands_exactly_at_the_start_delay() {
    let (mut controller, _, subtitle) = fixture(1200.0, 800.0, "Hello, world");
    controller.start();

    controller.advance(499);
    assert_eq!(text(&controller, subtitle), "");
    controller.advance(1);
    assert_eq!(text(&controller, subtitle), "H");
}

#[test]
fn characters_quantize_to_the_frame_grid() {
    let (mut controller, _, subtitle) = fixture(1200.0, 800.0, "Hello, world");
    controller.start();

    // The second character comes due at 530 but waits for the 544 frame.
    controller.advance(543);
    assert_eq!(text(&controller, subtitle), "H");
    controller.advance(1);
    assert_eq!(text(&controller, subtitle), "He");

    // The third comes due at 560, which is itself a frame instant.
    controller.advance(16);
    assert_eq!(text(&controller, subtitle), "Hel");
}

#[test]
fn typing_runs_to_completion_and_stops() {
    let (mut controller, _, subtitle) = fixture(1200.0, 800.0, "Hello, world");
    controller.start();

    // The final character comes due at 830 and lands on the 832 frame.
    controller.advance(831);
    assert_eq!(text(&controller, subtitle), "Hello, worl");
    assert!(controller.animations_running());

    controller.advance(1);
    assert_eq!(text(&controller, subtitle), "Hello, world");
    assert!(!controller.animations_running());

    controller.advance(500);
    assert_eq!(text(&controller, subtitle), "Hello, world");
}

#[test]
fn narrow_viewport_skips_typing_and_forces_the_intro_reveal() {
    let (mut controller, intro, subtitle) = fixture(500.0, 700.0, "Hello, world");
    controller.start();

    assert_eq!(text(&controller, subtitle), "Hello, world");
    assert!(!controller.animations_running());

    controller.advance(120);
    let intro_el = controller.page().element(intro).unwrap();
    // Revealed despite sitting far below the fold.
    assert!(intro_el.has_class("visible"));
    assert_eq!(text(&controller, subtitle), "Hello, world");
}

#[test]
fn typing_continues_while_the_page_is_hidden() {
    let (mut controller, _, subtitle) = fixture(1200.0, 800.0, "Hello, world");
    controller.start();
    controller.advance(520);
    assert_eq!(text(&controller, subtitle), "H");

    controller.dispatch(PageEvent::VisibilityChange { hidden: true });
    controller.advance(200);
    assert_eq!(text(&controller, subtitle), "Hello, w");

    controller.dispatch(PageEvent::VisibilityChange { hidden: false });
    controller.advance(2000);
    assert_eq!(text(&controller, subtitle), "Hello, world");
}

#[test]
fn empty_subtitle_never_starts_the_typewriter() {
    let (mut controller, _, subtitle) = fixture(1200.0, 800.0, "");
    controller.start();
    controller.advance(600);

    assert_eq!(text(&controller, subtitle), "");
    assert!(!controller.animations_running());
}

#[test]
fn removing_the_subtitle_aborts_typing() {
    let (mut controller, _, subtitle) = fixture(1200.0, 800.0, "Hello, world");
    controller.start();
    controller.advance(520);

    assert!(controller.page_mut().remove(subtitle));
    controller.advance(100);
    assert!(!controller.animations_running());
}
