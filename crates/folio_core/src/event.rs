//! Input events delivered by the embedder.
//!
//! # Responsibility
//! - Name every outside stimulus the engine reacts to.
//!
//! # Invariants
//! - Events carry raw facts (positions, targets); interpretation lives in
//!   the behavior layer.
//! - Click events bubble along the target's ancestor chain; pointer
//!   enter/leave events are delivered to the exact target only.

use crate::model::element::ElementId;

/// One outside stimulus applied to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// The page was scrolled to a new vertical offset.
    Scroll { top: f64 },
    /// The window geometry changed.
    Resize { width: f64, height: f64 },
    /// The tab was hidden or became visible again.
    VisibilityChange { hidden: bool },
    /// A click landed on `target`.
    Click { target: ElementId },
    /// The pointer entered `target`.
    MouseEnter { target: ElementId },
    /// The pointer left `target`.
    MouseLeave { target: ElementId },
}
