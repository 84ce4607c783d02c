//! Page tree and scroll state.
//!
//! # Responsibility
//! - Own the element arena for one loaded page.
//! - Track viewport, vertical scroll position and page visibility.
//! - Record programmatic scroll requests so embedders can observe intent.
//!
//! # Invariants
//! - `body` always exists and is never removable.
//! - Ids are handed out monotonically and never reused within one page.
//! - `scroll_y` stays within `[0, content_height - viewport.height]`,
//!   never negative.
//! - Document-order traversal is deterministic for a given tree.

use crate::model::element::{Element, ElementId, Rect, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for structural page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Structural misuse of the page tree.
///
/// Runtime behavior never produces these; lookups on absent elements return
/// `None` and the caller skips. Errors are reserved for construction-time
/// mistakes an embedder should hear about.
#[derive(Debug)]
pub enum PageError {
    /// `append` was given a parent id that is not in the tree.
    ParentNotFound(ElementId),
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParentNotFound(id) => write!(f, "parent element `{id}` not found"),
        }
    }
}

impl Error for PageError {}

/// How a programmatic scroll asked to be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    /// Jump directly to the target.
    Auto,
    /// Animate toward the target.
    Smooth,
}

/// A recorded programmatic scroll.
///
/// `top` is the requested target before clamping; the applied position is
/// whatever `Page::scroll_y` reports afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Element arena plus the scroll/visibility state of one loaded page.
#[derive(Debug, Clone)]
pub struct Page {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
    body: ElementId,
    viewport: Viewport,
    scroll_y: f64,
    hidden: bool,
    last_scroll_request: Option<ScrollRequest>,
}

impl Page {
    /// Creates an empty page holding only the `body` root.
    pub fn new(viewport: Viewport) -> Self {
        let body = ElementId::from_raw(0);
        let mut elements = BTreeMap::new();
        elements.insert(body, Element::new("body"));
        Self {
            elements,
            next_id: 1,
            body,
            viewport,
            scroll_y: 0.0,
            hidden: false,
            last_scroll_request: None,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replaces the viewport; the scroll position is re-clamped against the
    /// new geometry.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_y = self.clamp_scroll(self.scroll_y);
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        // The body root always exists, so a page is never logically empty;
        // kept for container-API symmetry.
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Attaches `element` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> PageResult<ElementId> {
        if !self.elements.contains_key(&parent) {
            return Err(PageError::ParentNotFound(parent));
        }
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;
        element.parent = Some(parent);
        element.children.clear();
        self.elements.insert(id, element);
        if let Some(parent_el) = self.elements.get_mut(&parent) {
            parent_el.children.push(id);
        }
        Ok(id)
    }

    /// Detaches and drops the subtree rooted at `id`.
    ///
    /// Returns whether anything was removed. The body root and unknown ids
    /// are left untouched.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.body || !self.elements.contains_key(&id) {
            return false;
        }
        if let Some(parent) = self.elements.get(&id).and_then(|el| el.parent) {
            if let Some(parent_el) = self.elements.get_mut(&parent) {
                parent_el.children.retain(|child| *child != id);
            }
        }
        for member in self.subtree(id) {
            self.elements.remove(&member);
        }
        true
    }

    /// Pre-order traversal of the whole tree, body first.
    pub fn document_order(&self) -> Vec<ElementId> {
        self.subtree(self.body)
    }

    /// Pre-order traversal of the subtree rooted at `root`.
    ///
    /// Returns an empty list for unknown roots.
    pub fn subtree(&self, root: ElementId) -> Vec<ElementId> {
        if !self.elements.contains_key(&root) {
            return Vec::new();
        }
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(&id) else {
                continue;
            };
            order.push(id);
            for child in element.children.iter().rev() {
                stack.push(*child);
            }
        }
        order
    }

    /// The element itself followed by its ancestors up to the body root.
    ///
    /// This is the propagation path for bubbling events. Unknown ids yield
    /// an empty path.
    pub fn ancestors_inclusive(&self, id: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(element) = self.elements.get(&current) else {
                break;
            };
            path.push(current);
            cursor = element.parent;
        }
        path
    }

    /// Layout box translated into viewport coordinates.
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(&id).map(|el| {
            Rect::new(
                el.layout.left,
                el.layout.top - self.scroll_y,
                el.layout.width,
                el.layout.height,
            )
        })
    }

    /// Total scrollable height: the lowest layout bottom, at least one
    /// viewport tall.
    pub fn content_height(&self) -> f64 {
        self.elements
            .values()
            .map(|el| el.layout.bottom())
            .fold(self.viewport.height, f64::max)
    }

    /// Moves the scroll position directly, as a user scroll does.
    ///
    /// Returns the applied (clamped) position.
    pub fn set_scroll_y(&mut self, top: f64) -> f64 {
        self.scroll_y = self.clamp_scroll(top);
        self.scroll_y
    }

    /// Performs a programmatic scroll and records the request.
    ///
    /// Returns the applied (clamped) position.
    pub fn request_scroll(&mut self, top: f64, behavior: ScrollBehavior) -> f64 {
        self.last_scroll_request = Some(ScrollRequest { top, behavior });
        self.set_scroll_y(top)
    }

    pub fn last_scroll_request(&self) -> Option<ScrollRequest> {
        self.last_scroll_request
    }

    fn clamp_scroll(&self, top: f64) -> f64 {
        let max = (self.content_height() - self.viewport.height).max(0.0);
        top.clamp(0.0, max)
    }
}
