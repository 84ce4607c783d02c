//! Constructed mobile navigation menu.
//!
//! # Responsibility
//! - Build the toggle button, dimming overlay and slide-in panel that the
//!   page markup never declares.
//! - Run the open/close state machine, including the body scroll lock.
//! - Show or hide the toggle as the viewport crosses the breakpoint.
//!
//! # Invariants
//! - Open state is readable from the page itself: panel `open`, toggle and
//!   overlay `active`, all three kept in lockstep by this module's paths.
//! - Every full close releases the body scroll lock; the anchor-follow
//!   dismissal deliberately leaves it to the delayed close.
//! - Menu content is fixed at build time and never re-rendered.

use crate::behavior::{PageScheduler, TimerAction, CLASS_ACTIVE};
use crate::model::element::{Element, ElementId};
use crate::model::page::{Page, PageResult};
use crate::query::{self, Selector};
use once_cell::sync::Lazy;

pub const CLASS_MENU_OPEN: &str = "open";
pub const CLASS_MENU_LINK: &str = "mobile-menu-link";

/// Delay between an in-menu anchor click and the follow-up close.
pub const MENU_CLOSE_DELAY_MS: u64 = 300;

pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/javierriveroe/";
pub const CONTACT_EMAIL_HREF: &str = "mailto:josejavier.re@gmail.com";

/// Fragment/label pairs rendered as the menu's section links, in order.
const MENU_SECTIONS: [(&str, &str); 3] = [
    ("#intro", "Introduction"),
    ("#why-me", "Why Me"),
    ("#together", "What We Can Do"),
];

const CONTACT_HEADING_CSS: &str =
    "color: var(--text-secondary); font-size: 0.9rem; margin-bottom: 1rem;";
const CONTACT_LINK_CSS: &str = "font-size: 0.95rem;";

const STYLE_OVERFLOW: &str = "overflow";
const OVERFLOW_HIDDEN: &str = "hidden";
const STYLE_DISPLAY: &str = "display";
const DISPLAY_NONE: &str = "none";
const DISPLAY_BLOCK: &str = "block";

static MENU_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r##"a[href^="#"]"##).expect("valid menu anchor selector"));

/// State machine over the constructed menu chrome.
#[derive(Debug, Default)]
pub struct MobileMenu {
    toggle: Option<ElementId>,
    overlay: Option<ElementId>,
    panel: Option<ElementId>,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the menu chrome and applies the initial toggle visibility.
    pub fn start(&mut self, page: &mut Page) {
        if let Err(err) = self.build(page) {
            log::warn!("event=menu_build_failed module=menu error={err}");
            return;
        }
        self.check_screen_size(page);
        log::info!(
            "event=menu_built module=menu links={}",
            MENU_SECTIONS.len()
        );
    }

    fn build(&mut self, page: &mut Page) -> PageResult<()> {
        let body = page.body();

        let toggle = page.append(body, Element::new("div").with_class("mobile-nav-toggle"))?;
        for _ in 0..3 {
            page.append(toggle, Element::new("span"))?;
        }

        let overlay = page.append(body, Element::new("div").with_class("mobile-menu-overlay"))?;
        let panel = page.append(body, Element::new("nav").with_class("mobile-menu"))?;

        let list = page.append(panel, Element::new("ul").with_class("mobile-menu-links"))?;
        for (href, label) in MENU_SECTIONS {
            let item = page.append(list, Element::new("li"))?;
            page.append(
                item,
                Element::new("a")
                    .with_href(href)
                    .with_class(CLASS_MENU_LINK)
                    .with_text(label),
            )?;
        }

        let mut contact = Element::new("div");
        contact.style_mut().set_property("margin-top", "2rem");
        contact.style_mut().set_property("padding-top", "2rem");
        contact
            .style_mut()
            .set_property("border-top", "1px solid var(--border-color)");
        let contact = page.append(panel, contact)?;

        let mut heading = Element::new("p").with_text("Contact");
        heading.style_mut().apply_css_text(CONTACT_HEADING_CSS);
        page.append(contact, heading)?;

        let mut linkedin = Element::new("a")
            .with_href(LINKEDIN_URL)
            .with_link_target("_blank")
            .with_class(CLASS_MENU_LINK)
            .with_text("LinkedIn");
        linkedin.style_mut().apply_css_text(CONTACT_LINK_CSS);
        page.append(contact, linkedin)?;

        let mut email = Element::new("a")
            .with_href(CONTACT_EMAIL_HREF)
            .with_class(CLASS_MENU_LINK)
            .with_text("Email");
        email.style_mut().apply_css_text(CONTACT_LINK_CSS);
        page.append(contact, email)?;

        self.toggle = Some(toggle);
        self.overlay = Some(overlay);
        self.panel = Some(panel);
        Ok(())
    }

    pub fn toggle_id(&self) -> Option<ElementId> {
        self.toggle
    }

    pub fn overlay_id(&self) -> Option<ElementId> {
        self.overlay
    }

    pub fn panel_id(&self) -> Option<ElementId> {
        self.panel
    }

    pub fn is_open(&self, page: &Page) -> bool {
        self.panel
            .and_then(|id| page.element(id))
            .is_some_and(|el| el.has_class(CLASS_MENU_OPEN))
    }

    /// Routes a bubbled click to the toggle, the overlay, or an in-menu
    /// anchor. Anything else is ignored.
    ///
    /// In-menu anchors are resolved by a panel-subtree query at dispatch
    /// time, so anchors elsewhere on the page never arm the delayed close.
    pub fn handle_click(&self, page: &mut Page, scheduler: &mut PageScheduler, target: ElementId) {
        let path = page.ancestors_inclusive(target);

        if self.toggle.is_some_and(|toggle| path.contains(&toggle)) {
            self.toggle_menu(page);
            return;
        }
        if self.overlay.is_some_and(|overlay| path.contains(&overlay)) {
            self.close(page);
            return;
        }
        let Some(panel) = self.panel else {
            return;
        };
        let menu_anchors = query::select_within(page, panel, &MENU_ANCHORS);
        if path.iter().any(|id| menu_anchors.contains(id)) {
            scheduler.schedule_timer(MENU_CLOSE_DELAY_MS, TimerAction::CloseMobileMenu);
            log::debug!(
                "event=menu_close_scheduled module=menu delay_ms={MENU_CLOSE_DELAY_MS}"
            );
        }
    }

    /// Flips the menu between open and closed.
    pub fn toggle_menu(&self, page: &mut Page) {
        let (Some(toggle), Some(overlay), Some(panel)) = (self.toggle, self.overlay, self.panel)
        else {
            return;
        };
        if let Some(el) = page.element_mut(toggle) {
            el.toggle_class(CLASS_ACTIVE);
        }
        if let Some(el) = page.element_mut(panel) {
            el.toggle_class(CLASS_MENU_OPEN);
        }
        if let Some(el) = page.element_mut(overlay) {
            el.toggle_class(CLASS_ACTIVE);
        }

        let open = self.is_open(page);
        let body = page.body();
        if let Some(body_el) = page.element_mut(body) {
            if open {
                body_el
                    .style_mut()
                    .set_property(STYLE_OVERFLOW, OVERFLOW_HIDDEN);
            } else {
                body_el.style_mut().remove_property(STYLE_OVERFLOW);
            }
        }
        log::debug!(
            "event=menu_toggle module=menu state={}",
            if open { "open" } else { "closed" }
        );
    }

    /// Fully closes the menu and releases the body scroll lock.
    ///
    /// Safe to apply when already closed; the late close timer relies on
    /// that to restore scrolling after an anchor-follow dismissal.
    pub fn close(&self, page: &mut Page) {
        let was_open = self.is_open(page);
        self.remove_open_classes(page);
        let body = page.body();
        if let Some(body_el) = page.element_mut(body) {
            body_el.style_mut().remove_property(STYLE_OVERFLOW);
        }
        if was_open {
            log::debug!("event=menu_close module=menu");
        }
    }

    /// Drops the open classes without touching the body scroll lock.
    ///
    /// The anchor-follow path uses this so the page cannot scroll under
    /// the closing menu; the scheduled close releases the lock.
    pub fn dismiss(&self, page: &mut Page) {
        if !self.is_open(page) {
            return;
        }
        self.remove_open_classes(page);
        log::debug!("event=menu_dismiss module=menu");
    }

    /// Shows the toggle on narrow viewports; hides it and force-closes the
    /// menu on wide ones.
    pub fn check_screen_size(&self, page: &mut Page) {
        let Some(toggle) = self.toggle else {
            return;
        };
        if page.viewport().is_mobile() {
            if let Some(el) = page.element_mut(toggle) {
                el.style_mut().set_property(STYLE_DISPLAY, DISPLAY_BLOCK);
            }
        } else {
            if let Some(el) = page.element_mut(toggle) {
                el.style_mut().set_property(STYLE_DISPLAY, DISPLAY_NONE);
            }
            self.close(page);
        }
    }

    fn remove_open_classes(&self, page: &mut Page) {
        if let Some(panel) = self.panel {
            if let Some(el) = page.element_mut(panel) {
                el.remove_class(CLASS_MENU_OPEN);
            }
        }
        if let Some(overlay) = self.overlay {
            if let Some(el) = page.element_mut(overlay) {
                el.remove_class(CLASS_ACTIVE);
            }
        }
        if let Some(toggle) = self.toggle {
            if let Some(el) = page.element_mut(toggle) {
                el.remove_class(CLASS_ACTIVE);
            }
        }
    }
}
