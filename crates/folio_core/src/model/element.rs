//! Element domain model.
//!
//! # Responsibility
//! - Define the node shape shared by every behavior family: tag, classes,
//!   inline styles, text content, layout box and tree links.
//! - Provide class-list and inline-style helpers with browser-like semantics.
//!
//! # Invariants
//! - `ElementId` values are allocated by the owning page and never reused.
//! - Class membership is a set: adding twice keeps one entry.
//! - Style property names are stored as given; this crate uses kebab-case
//!   throughout (`animation-play-state`, `border-color`, ...).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// Viewport width at or below which mobile behavior applies, in CSS pixels.
///
/// Shared by every behavior family so the layout mode never disagrees
/// between them.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Page-scoped handle for one element.
///
/// Plain monotonic counter rather than a global id: elements never outlive
/// their page and never travel between pages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value, for log lines and snapshots.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Page-absolute layout box in CSS pixels.
///
/// Layout is fixture-provided: this crate never computes flow layout, it
/// only reads boxes back (scroll math, intersection ratios, burst origins).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center point as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }
}

/// Visible window onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether mobile behavior applies at this width.
    pub fn is_mobile(&self) -> bool {
        self.width <= MOBILE_BREAKPOINT_PX
    }
}

/// Ordered inline-style property map.
///
/// Values are opaque strings; design-token references like
/// `var(--text-primary)` pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    properties: BTreeMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Removes a property, returning its previous value.
    ///
    /// The browser analog is assigning the empty string to a style slot.
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.properties.remove(name)
    }

    /// Merges a `prop: value; prop: value;` declaration block into the map.
    ///
    /// Tolerates arbitrary whitespace and blank declarations. Declarations
    /// without a `:` are skipped. Later declarations win over earlier ones
    /// and over existing entries.
    pub fn apply_css_text(&mut self, css: &str) {
        for declaration in css.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            self.properties.insert(name.to_string(), value.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// One node of the page tree.
///
/// Tree links are owned by the page arena; behavior code reads them through
/// the accessors and mutates structure only via page operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name (`div`, `a`, `section`, ...).
    pub tag: String,
    /// HTML `id` attribute, the target of `#fragment` navigation.
    pub dom_id: Option<String>,
    /// Link destination for anchor elements.
    pub href: Option<String>,
    /// Browsing-context hint for anchors (`_blank` opens a new tab).
    pub link_target: Option<String>,
    classes: BTreeSet<String>,
    style: StyleMap,
    text: String,
    /// Page-absolute layout box.
    pub layout: Rect,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            dom_id: None,
            href: None,
            link_target: None,
            classes: BTreeSet::new(),
            style: StyleMap::new(),
            text: String::new(),
            layout: Rect::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = Some(dom_id.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_link_target(mut self, link_target: impl Into<String>) -> Self {
        self.link_target = Some(link_target.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_layout(mut self, layout: Rect) -> Self {
        self.layout = layout;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Adds a class; returns whether it was newly added.
    pub fn add_class(&mut self, class: impl Into<String>) -> bool {
        self.classes.insert(class.into())
    }

    /// Removes a class; returns whether it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }

    /// Flips class membership; returns whether the class is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.remove(class) {
            false
        } else {
            self.classes.insert(class.to_string());
            true
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleMap {
        &mut self.style
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Appends one character to the text content.
    pub fn append_text(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_class_flips_membership() {
        let mut el = Element::new("li").with_class("todo-item");
        assert!(el.toggle_class("checked"));
        assert!(el.has_class("checked"));
        assert!(!el.toggle_class("checked"));
        assert!(!el.has_class("checked"));
    }

    #[test]
    fn add_class_is_idempotent() {
        let mut el = Element::new("div");
        assert!(el.add_class("visible"));
        assert!(!el.add_class("visible"));
        assert_eq!(el.classes().count(), 1);
    }

    #[test]
    fn css_text_block_parses_into_properties() {
        let mut style = StyleMap::new();
        style.apply_css_text(
            "position: fixed;\n bottom: 30px;\n border: 2px solid var(--border-color);\n",
        );
        assert_eq!(style.property("position"), Some("fixed"));
        assert_eq!(style.property("bottom"), Some("30px"));
        assert_eq!(
            style.property("border"),
            Some("2px solid var(--border-color)")
        );
        assert_eq!(style.property("missing"), None);
    }

    #[test]
    fn css_text_skips_blank_declarations() {
        let mut style = StyleMap::new();
        style.apply_css_text("; opacity: 0 ;; junk ;");
        assert_eq!(style.len(), 1);
        assert_eq!(style.property("opacity"), Some("0"));
    }

    #[test]
    fn mobile_breakpoint_is_inclusive() {
        assert!(Viewport::new(768.0, 900.0).is_mobile());
        assert!(!Viewport::new(768.1, 900.0).is_mobile());
        assert!(Viewport::new(375.0, 667.0).is_mobile());
    }

    #[test]
    fn element_id_displays_with_prefix() {
        assert_eq!(ElementId::from_raw(17).to_string(), "e17");
    }

    #[test]
    fn rect_center_is_midpoint() {
        let rect = Rect::new(100.0, 200.0, 50.0, 30.0);
        assert_eq!(rect.center(), (125.0, 215.0));
        assert_eq!(rect.bottom(), 230.0);
        assert_eq!(rect.right(), 150.0);
    }
}
