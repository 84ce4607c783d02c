//! Viewport-intersection watching.
//!
//! # Responsibility
//! - Track which elements are waiting to become visible enough to matter.
//! - Report each watched element exactly once, the first time its
//!   intersection with the effective root reaches the threshold.
//!
//! # Invariants
//! - The effective root is the viewport with its bottom edge pulled up by
//!   the root margin, so elements must be meaningfully on screen before
//!   they report.
//! - Sweeps are deterministic: same page state, same report order.
//! - An element removed from the page while watched is dropped silently.

use crate::model::element::ElementId;
use crate::model::page::Page;
use std::collections::BTreeSet;

/// Fraction of an element that must be inside the root before it reports.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Adjustment applied to the root's bottom edge, in CSS pixels. Negative
/// values shrink the root upward.
pub const DEFAULT_ROOT_MARGIN_BOTTOM_PX: f64 = -50.0;

/// Tuning for the intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionConfig {
    pub threshold: f64,
    pub root_margin_bottom: f64,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin_bottom: DEFAULT_ROOT_MARGIN_BOTTOM_PX,
        }
    }
}

/// One-shot visibility watcher over a set of elements.
#[derive(Debug, Default)]
pub struct IntersectionWatcher {
    config: IntersectionConfig,
    watched: BTreeSet<ElementId>,
}

impl IntersectionWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IntersectionConfig) -> Self {
        Self {
            config,
            watched: BTreeSet::new(),
        }
    }

    /// Starts watching an element; returns whether it was newly added.
    pub fn observe(&mut self, id: ElementId) -> bool {
        self.watched.insert(id)
    }

    /// Stops watching an element; returns whether it was being watched.
    pub fn unobserve(&mut self, id: ElementId) -> bool {
        self.watched.remove(&id)
    }

    pub fn is_watching(&self, id: ElementId) -> bool {
        self.watched.contains(&id)
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Fraction of the element currently inside the effective root.
    ///
    /// `None` for elements missing from the page. Zero-height elements
    /// report a zero ratio; [`is_intersecting`](Self::is_intersecting)
    /// handles them by position instead.
    pub fn intersection_ratio(&self, page: &Page, id: ElementId) -> Option<f64> {
        let rect = page.bounding_client_rect(id)?;
        if rect.height <= 0.0 {
            return Some(0.0);
        }
        let root_bottom = page.viewport().height + self.config.root_margin_bottom;
        let visible = (rect.bottom().min(root_bottom) - rect.top.max(0.0)).max(0.0);
        Some(visible / rect.height)
    }

    /// Whether the element currently clears the reporting threshold.
    pub fn is_intersecting(&self, page: &Page, id: ElementId) -> bool {
        let Some(rect) = page.bounding_client_rect(id) else {
            return false;
        };
        if rect.height <= 0.0 {
            let root_bottom = page.viewport().height + self.config.root_margin_bottom;
            return rect.top >= 0.0 && rect.top <= root_bottom;
        }
        match self.intersection_ratio(page, id) {
            Some(ratio) => ratio >= self.config.threshold,
            None => false,
        }
    }

    /// Reports every watched element that now clears the threshold and
    /// stops watching it. Elements gone from the page are dropped without
    /// reporting.
    pub fn sweep(&mut self, page: &Page) -> Vec<ElementId> {
        let mut reported = Vec::new();
        let watched = std::mem::take(&mut self.watched);
        for id in watched {
            if !page.contains(id) {
                continue;
            }
            if self.is_intersecting(page, id) {
                reported.push(id);
            } else {
                self.watched.insert(id);
            }
        }
        if !reported.is_empty() {
            log::debug!(
                "event=intersection_sweep module=observe reported={} remaining={}",
                reported.len(),
                self.watched.len()
            );
        }
        reported
    }
}
