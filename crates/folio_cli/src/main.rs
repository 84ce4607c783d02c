//! Scripted portfolio session.
//!
//! # Responsibility
//! - Build the stock portfolio fixture page, start the controller and
//!   replay one deterministic session: reveal sweep, typewriter, a scroll
//!   tour, the mobile menu and checklist completion.
//! - Print stable `key=value` checkpoints plus a final JSON snapshot so
//!   the binary doubles as a smoke probe for the engine.

use folio_core::{
    default_log_level, init_logging, select, select_first, ControllerConfig, Element, ElementId,
    Page, PageController, PageEvent, PageResult, Rect, Selector, Viewport,
};
use serde_json::json;
use std::error::Error;

const SUBTITLE_TEXT: &str = "Building calm, useful software for the web.";
const DEMO_SEED: u64 = 7;

struct Fixture {
    page: Page,
    subtitle: ElementId,
    project_link: ElementId,
    todo_items: Vec<ElementId>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("folio: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::temp_dir().join("folio-demo-logs");
    if let Err(message) = init_logging(default_log_level(), &log_dir) {
        eprintln!("folio: logging disabled: {message}");
    }
    println!("folio_core version={}", folio_core::core_version());

    let revealed = Selector::parse(".fade-in-element.visible")?;
    let checked = Selector::parse(".todo-item.checked")?;
    let active_nav = Selector::parse(".nav-link.active")?;
    let progress_bar = Selector::parse(".progress-bar")?;

    let Fixture {
        page,
        subtitle,
        project_link,
        todo_items,
    } = build_fixture()?;
    let mut controller = PageController::with_config(
        page,
        ControllerConfig {
            frame_interval_ms: 16,
            rng_seed: Some(DEMO_SEED),
        },
    );
    controller.start();

    // First reveal lands after the 100ms stagger delay.
    controller.advance(120);
    println!(
        "step=initial_reveal now_ms={} revealed={} subtitle={:?}",
        controller.now_ms(),
        select(controller.page(), &revealed).len(),
        text_of(controller.page(), subtitle),
    );

    // Three characters are typed by 580ms: 500ms start, then one per 30ms
    // quantized onto 16ms frames.
    controller.advance(460);
    println!(
        "step=typewriter_start now_ms={} subtitle={:?}",
        controller.now_ms(),
        text_of(controller.page(), subtitle),
    );

    controller.advance(1300);
    println!(
        "step=typewriter_done now_ms={} subtitle={:?} animating={}",
        controller.now_ms(),
        text_of(controller.page(), subtitle),
        controller.animations_running(),
    );

    // Scroll tour in steps small enough that every section passes through
    // the viewport; discrete jumps past an element would skip its reveal.
    for top in [400.0, 900.0, 1300.0, 1700.0] {
        controller.dispatch(PageEvent::Scroll { top });
        controller.advance(120);
    }
    println!(
        "step=scroll_tour now_ms={} scroll_y={} revealed={} active_nav={:?}",
        controller.now_ms(),
        controller.page().scroll_y(),
        select(controller.page(), &revealed).len(),
        active_link_label(controller.page(), &active_nav),
    );

    controller.dispatch(PageEvent::MouseEnter {
        target: project_link,
    });
    println!(
        "step=link_hover transform={:?}",
        style_of(controller.page(), project_link, "transform"),
    );
    controller.dispatch(PageEvent::MouseLeave {
        target: project_link,
    });

    let baseline_elements = controller.page().len();
    controller.dispatch(PageEvent::Click {
        target: todo_items[0],
    });
    println!(
        "step=first_goal now_ms={} progress={:?} page_elements={} (baseline {})",
        controller.now_ms(),
        readout_text(controller.page(), &progress_bar),
        controller.page().len(),
        baseline_elements,
    );

    controller.advance(900);
    println!(
        "step=burst_settled now_ms={} page_elements={} animating={}",
        controller.now_ms(),
        controller.page().len(),
        controller.animations_running(),
    );

    controller.dispatch(PageEvent::Resize {
        width: 390.0,
        height: 844.0,
    });
    let toggle = controller.menu().toggle_id();
    let toggle_display = toggle
        .map(|id| style_of(controller.page(), id, "display"))
        .unwrap_or_default();
    println!("step=mobile_resize viewport=390x844 toggle_display={toggle_display:?}");

    if let Some(toggle) = toggle {
        controller.dispatch(PageEvent::Click { target: toggle });
    }
    println!(
        "step=menu_open open={} scroll_locked={}",
        controller.menu().is_open(controller.page()),
        scroll_locked(controller.page()),
    );

    // The third menu entry navigates to #together: the jump is immediate,
    // the menu dismisses, and the scroll lock lifts 300ms later.
    let menu_links = Selector::parse(".mobile-menu-link")?;
    if let Some(link) = select(controller.page(), &menu_links).get(2).copied() {
        controller.dispatch(PageEvent::Click { target: link });
    }
    println!(
        "step=menu_navigate now_ms={} scroll_y={} open={} scroll_locked={}",
        controller.now_ms(),
        controller.page().scroll_y(),
        controller.menu().is_open(controller.page()),
        scroll_locked(controller.page()),
    );

    controller.advance(350);
    println!(
        "step=menu_released now_ms={} scroll_locked={} active_nav={:?}",
        controller.now_ms(),
        scroll_locked(controller.page()),
        active_link_label(controller.page(), &active_nav),
    );

    controller.dispatch(PageEvent::Click {
        target: todo_items[1],
    });
    controller.advance(40);
    controller.dispatch(PageEvent::Click {
        target: todo_items[2],
    });
    println!(
        "step=all_goals now_ms={} progress={:?}",
        controller.now_ms(),
        readout_text(controller.page(), &progress_bar),
    );

    controller.advance(120);
    println!(
        "step=pulse_expand now_ms={} readout_transform={:?}",
        controller.now_ms(),
        readout_style(controller.page(), &progress_bar, "transform"),
    );

    controller.advance(1000);
    println!(
        "step=session_settled now_ms={} readout_transform={:?} animating={}",
        controller.now_ms(),
        readout_style(controller.page(), &progress_bar, "transform"),
        controller.animations_running(),
    );

    let page = controller.page();
    let snapshot = json!({
        "now_ms": controller.now_ms(),
        "viewport": { "width": page.viewport().width, "height": page.viewport().height },
        "scroll_y": page.scroll_y(),
        "revealed": select(page, &revealed).len(),
        "checked_goals": select(page, &checked).len(),
        "progress_text": readout_text(page, &progress_bar),
        "menu_open": controller.menu().is_open(page),
        "scroll_locked": scroll_locked(page),
        "last_scroll_request": page.last_scroll_request(),
        "elements": page.len(),
    });
    println!("snapshot={}", serde_json::to_string(&snapshot)?);
    Ok(())
}

/// Assembles the three-section portfolio page the way the live site lays
/// it out: fixed nav, intro hero, skill cards, goal checklist.
fn build_fixture() -> PageResult<Fixture> {
    let mut page = Page::new(Viewport::new(1200.0, 800.0));
    let body = page.body();

    let nav = page.append(
        body,
        Element::new("nav").with_layout(Rect::new(0.0, 0.0, 1200.0, 60.0)),
    )?;
    for (index, (href, label)) in [
        ("#intro", "Introduction"),
        ("#why-me", "Why Me"),
        ("#together", "What We Can Do"),
    ]
    .into_iter()
    .enumerate()
    {
        let left = 840.0 + index as f64 * 120.0;
        page.append(
            nav,
            Element::new("a")
                .with_class("nav-link")
                .with_href(href)
                .with_text(label)
                .with_layout(Rect::new(left, 18.0, 110.0, 24.0)),
        )?;
    }

    let intro = page.append(
        body,
        Element::new("section")
            .with_dom_id("intro")
            .with_class("section")
            .with_layout(Rect::new(0.0, 60.0, 1200.0, 840.0)),
    )?;
    let intro_content = page.append(
        intro,
        Element::new("div")
            .with_class("intro-content")
            .with_layout(Rect::new(200.0, 160.0, 800.0, 400.0)),
    )?;
    page.append(
        intro_content,
        Element::new("h1")
            .with_text("Javier Rivero")
            .with_layout(Rect::new(200.0, 200.0, 800.0, 80.0)),
    )?;
    let subtitle = page.append(
        intro_content,
        Element::new("p")
            .with_class("intro-subtitle")
            .with_text(SUBTITLE_TEXT)
            .with_layout(Rect::new(200.0, 300.0, 800.0, 40.0)),
    )?;

    let why_me = page.append(
        body,
        Element::new("section")
            .with_dom_id("why-me")
            .with_class("section")
            .with_layout(Rect::new(0.0, 900.0, 1200.0, 1000.0)),
    )?;
    page.append(
        why_me,
        Element::new("h2")
            .with_class("section-title")
            .with_text("Why Me")
            .with_layout(Rect::new(100.0, 960.0, 1000.0, 60.0)),
    )?;
    page.append(
        why_me,
        Element::new("p")
            .with_class("section-subtitle")
            .with_text("A few reasons to build together.")
            .with_layout(Rect::new(100.0, 1030.0, 1000.0, 30.0)),
    )?;
    let mut project_link = None;
    for (index, skill) in ["Product thinking", "Frontend craft", "Calm delivery"]
        .into_iter()
        .enumerate()
    {
        let top = 1100.0 + index as f64 * 160.0;
        let card = page.append(
            why_me,
            Element::new("div")
                .with_class("skill-card")
                .with_text(skill)
                .with_layout(Rect::new(100.0, top, 1000.0, 120.0)),
        )?;
        if index == 0 {
            let link = page.append(
                card,
                Element::new("a")
                    .with_class("project-link")
                    .with_href("https://github.com/javierriveroe")
                    .with_text("See the work")
                    .with_layout(Rect::new(120.0, top + 70.0, 140.0, 20.0)),
            )?;
            project_link = Some(link);
        }
    }

    let together = page.append(
        body,
        Element::new("section")
            .with_dom_id("together")
            .with_class("section")
            .with_layout(Rect::new(0.0, 1900.0, 1200.0, 1100.0)),
    )?;
    page.append(
        together,
        Element::new("h2")
            .with_class("section-title")
            .with_text("What We Can Do")
            .with_layout(Rect::new(100.0, 1960.0, 1000.0, 60.0)),
    )?;
    page.append(
        together,
        Element::new("p")
            .with_class("section-subtitle")
            .with_text("Pick the goals that matter to you.")
            .with_layout(Rect::new(100.0, 2030.0, 1000.0, 30.0)),
    )?;
    let mut todo_items = Vec::new();
    for (index, goal) in [
        "Ship the landing page",
        "Wire up analytics",
        "Launch the newsletter",
    ]
    .into_iter()
    .enumerate()
    {
        let top = 2100.0 + index as f64 * 120.0;
        let item = page.append(
            together,
            Element::new("div")
                .with_class("todo-item")
                .with_text(goal)
                .with_layout(Rect::new(100.0, top, 1000.0, 100.0)),
        )?;
        page.append(
            item,
            Element::new("div")
                .with_class("todo-checkbox")
                .with_layout(Rect::new(120.0, top + 40.0, 20.0, 20.0)),
        )?;
        todo_items.push(item);
    }

    let project_link = project_link.unwrap_or(body);
    Ok(Fixture {
        page,
        subtitle,
        project_link,
        todo_items,
    })
}

fn text_of(page: &Page, id: ElementId) -> String {
    page.element(id)
        .map(|el| el.text().to_string())
        .unwrap_or_default()
}

fn style_of(page: &Page, id: ElementId, property: &str) -> String {
    page.element(id)
        .and_then(|el| el.style().property(property))
        .unwrap_or("(unset)")
        .to_string()
}

fn readout_text(page: &Page, progress_bar: &Selector) -> String {
    select_first(page, progress_bar)
        .map(|id| text_of(page, id))
        .unwrap_or_default()
}

fn readout_style(page: &Page, progress_bar: &Selector, property: &str) -> String {
    select_first(page, progress_bar)
        .map(|id| style_of(page, id, property))
        .unwrap_or_default()
}

fn active_link_label(page: &Page, active_nav: &Selector) -> String {
    select_first(page, active_nav)
        .map(|id| text_of(page, id))
        .unwrap_or_default()
}

fn scroll_locked(page: &Page) -> bool {
    page.element(page.body())
        .map(|el| el.style().property("overflow") == Some("hidden"))
        .unwrap_or(false)
}
