//! Interaction behavior families.
//!
//! # Responsibility
//! - Implement the four behavior families of the page: fade-in reveals,
//!   scroll-spy navigation, the constructed mobile menu, and checklist
//!   interactions.
//! - Define the timer/frame vocabularies the controller interprets.
//!
//! # Invariants
//! - Each family is the single writer of its own state; cross-family
//!   effects go through the controller.
//! - Timer payloads must be safe to apply late: state that moved on turns
//!   them into no-ops.

pub mod checklist;
pub mod fade;
pub mod menu;
pub mod nav;

use crate::model::element::ElementId;
use crate::model::page::Page;
use crate::schedule::Scheduler;

/// Class marking the currently highlighted element of a link group and the
/// engaged state of the menu toggle/overlay.
pub const CLASS_ACTIVE: &str = "active";

/// Payload of a one-shot timer, interpreted by the controller when due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Reveal one fade-tracked element.
    RevealElement(ElementId),
    /// Begin typing the intro subtitle.
    StartTypewriter,
    /// Close the mobile menu and restore body scrolling.
    CloseMobileMenu,
    /// Step the completion pulse on the progress readout.
    ProgressPulse(PulsePhase),
}

/// Two-beat scale pulse played when the checklist completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePhase {
    /// Grow to 110%.
    Expand,
    /// Settle back to 100%.
    Settle,
}

/// Coalesced per-frame work; at most one of each runs per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FrameTask {
    /// Recompute the scroll-spy highlight.
    HighlightNav,
}

/// The scheduler specialization every behavior family talks to.
pub type PageScheduler = Scheduler<TimerAction, FrameTask>;

/// First element of a bubble path that is a `#`-fragment anchor.
pub(crate) fn fragment_anchor_in(page: &Page, path: &[ElementId]) -> Option<ElementId> {
    path.iter().copied().find(|id| {
        page.element(*id).is_some_and(|el| {
            el.tag == "a" && el.href.as_deref().is_some_and(|href| href.starts_with('#'))
        })
    })
}
