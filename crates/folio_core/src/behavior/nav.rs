//! Scroll-spy navigation highlight and anchor following.
//!
//! # Responsibility
//! - Keep the `active` highlight on the nav link whose section contains the
//!   scroll reference point.
//! - Follow `#`-fragment anchors with a smooth scroll and the narrow-
//!   viewport offset.
//!
//! # Invariants
//! - Desktop and mobile link groups are highlighted by the same section
//!   index and never disagree.
//! - When no section contains the reference point, the previous highlight
//!   is left untouched.
//! - Recomputation is idempotent for an unchanged scroll position.

use crate::behavior::{fragment_anchor_in, CLASS_ACTIVE};
use crate::model::element::ElementId;
use crate::model::page::{Page, ScrollBehavior};
use crate::query::{self, Selector};
use once_cell::sync::Lazy;

/// Gap left above a section when jumping to it on narrow viewports.
pub const MOBILE_ANCHOR_OFFSET_PX: f64 = 20.0;

/// Fraction of the viewport height used for the scroll reference point.
const REFERENCE_DIVISOR: f64 = 3.0;

static SECTIONS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".section").expect("valid section selector"));
static NAV_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".nav-link").expect("valid nav link selector"));
static MOBILE_MENU_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".mobile-menu-link").expect("valid mobile link selector"));

/// Scroll-spy over the page's section and link groups.
///
/// Stateless by design: the highlight lives in element classes, so the page
/// itself is the source of truth between recomputations.
#[derive(Debug, Default)]
pub struct NavHighlighter;

impl NavHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Recomputes the highlight from the current scroll position.
    ///
    /// The reference point sits one third of the viewport below the scroll
    /// offset; the last section whose span contains it wins.
    pub fn recompute(&self, page: &mut Page) {
        let reference = page.scroll_y() + page.viewport().height / REFERENCE_DIVISOR;
        let sections = query::select(page, &SECTIONS);

        let mut active = None;
        for (index, id) in sections.iter().enumerate() {
            let Some(el) = page.element(*id) else {
                continue;
            };
            let top = el.layout.top;
            if reference >= top && reference < top + el.layout.height {
                active = Some(index);
            }
        }
        let Some(active) = active else {
            return;
        };

        let previous = active_index(page, &NAV_LINKS);
        apply_highlight(page, &NAV_LINKS, active);
        apply_highlight(page, &MOBILE_MENU_LINKS, active);
        if previous != Some(active) {
            log::debug!(
                "event=nav_highlight module=nav section={active} previous={previous:?}"
            );
        }
    }

    /// Follows a `#`-fragment anchor found on the click's bubble path.
    ///
    /// Returns whether a scroll was requested. Unknown fragments and
    /// non-anchor clicks change nothing.
    pub fn handle_anchor_click(&self, page: &mut Page, target: ElementId) -> bool {
        let path = page.ancestors_inclusive(target);
        let Some(anchor) = fragment_anchor_in(page, &path) else {
            return false;
        };
        let Some(href) = page.element(anchor).and_then(|el| el.href.clone()) else {
            return false;
        };
        let Ok(fragment) = Selector::parse(href.as_str()) else {
            return false;
        };
        let Some(section) = query::select_first(page, &fragment) else {
            return false;
        };
        let Some(section_top) = page.element(section).map(|el| el.layout.top) else {
            return false;
        };

        let offset = if page.viewport().is_mobile() {
            MOBILE_ANCHOR_OFFSET_PX
        } else {
            0.0
        };
        let requested = section_top - offset;
        let applied = page.request_scroll(requested, ScrollBehavior::Smooth);
        log::debug!(
            "event=anchor_follow module=nav href={href} requested={requested} applied={applied}"
        );
        true
    }
}

fn active_index(page: &Page, group: &Selector) -> Option<usize> {
    query::select(page, group)
        .iter()
        .position(|id| page.element(*id).is_some_and(|el| el.has_class(CLASS_ACTIVE)))
}

fn apply_highlight(page: &mut Page, group: &Selector, active: usize) {
    for (index, id) in query::select(page, group).iter().enumerate() {
        if let Some(el) = page.element_mut(*id) {
            if index == active {
                el.add_class(CLASS_ACTIVE);
            } else {
                el.remove_class(CLASS_ACTIVE);
            }
        }
    }
}
