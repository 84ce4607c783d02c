//! Selector parsing and matching.
//!
//! # Responsibility
//! - Parse the selector grammar the behavior layer relies on.
//! - Match parsed selectors against elements in document order.
//!
//! # Invariants
//! - The grammar is intentionally small: tag, `#id`, `.class` chains, an
//!   `[href^="..."]` prefix test, and comma unions. Anything else is
//!   rejected at parse time rather than silently matching nothing.
//! - Matching never mutates the page and never allocates per element.

use crate::model::element::{Element, ElementId};
use crate::model::page::Page;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for selector parsing.
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Selector-layer error for unsupported or malformed selector text.
#[derive(Debug)]
pub enum SelectorError {
    /// The selector text was empty or whitespace.
    Empty,
    /// One alternative of the selector could not be parsed.
    InvalidSelector {
        selector: String,
        message: String,
    },
}

impl Display for SelectorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::InvalidSelector { selector, message } => {
                write!(f, "invalid selector `{selector}`: {message}")
            }
        }
    }
}

impl Error for SelectorError {}

static SIMPLE_SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<tag>[a-zA-Z][a-zA-Z0-9-]*)?(?:#(?P<id>[a-zA-Z][a-zA-Z0-9_-]*))?(?P<classes>(?:\.[a-zA-Z][a-zA-Z0-9_-]*)*)(?:\[href\^="(?P<href>[^"]*)"\])?$"#,
    )
    .expect("valid simple selector regex")
});

/// One comma-separated alternative of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SimpleSelector {
    tag: Option<String>,
    dom_id: Option<String>,
    classes: Vec<String>,
    href_prefix: Option<String>,
}

impl SimpleSelector {
    fn parse(text: &str) -> SelectorResult<Self> {
        let captures = SIMPLE_SELECTOR_RE.captures(text).ok_or_else(|| {
            SelectorError::InvalidSelector {
                selector: text.to_string(),
                message: "unsupported selector syntax".to_string(),
            }
        })?;

        let tag = captures.name("tag").map(|m| m.as_str().to_string());
        let dom_id = captures.name("id").map(|m| m.as_str().to_string());
        let classes = captures
            .name("classes")
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split('.')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        let href_prefix = captures.name("href").map(|m| m.as_str().to_string());

        if tag.is_none() && dom_id.is_none() && classes.is_empty() && href_prefix.is_none() {
            return Err(SelectorError::InvalidSelector {
                selector: text.to_string(),
                message: "selector matches nothing".to_string(),
            });
        }

        Ok(Self {
            tag,
            dom_id,
            classes,
            href_prefix,
        })
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(dom_id) = &self.dom_id {
            if element.dom_id.as_deref() != Some(dom_id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        if let Some(prefix) = &self.href_prefix {
            match element.href.as_deref() {
                Some(href) if href.starts_with(prefix.as_str()) => {}
                _ => return false,
            }
        }
        true
    }
}

/// A parsed selector: a union of simple alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    text: String,
    alternatives: Vec<SimpleSelector>,
}

impl Selector {
    /// Parses selector text, e.g. `.todo-item.checked` or
    /// `.nav-link, a[href^="#"]`.
    pub fn parse(text: impl Into<String>) -> SelectorResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut alternatives = Vec::new();
        for part in text.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(SelectorError::InvalidSelector {
                    selector: text.clone(),
                    message: "empty alternative in selector list".to_string(),
                });
            }
            alternatives.push(SimpleSelector::parse(part)?);
        }
        Ok(Self { text, alternatives })
    }

    /// The source text this selector was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether any alternative matches the element.
    pub fn matches(&self, element: &Element) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(element))
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// All matching elements of the page, in document order.
pub fn select(page: &Page, selector: &Selector) -> Vec<ElementId> {
    collect_matches(page, page.document_order(), selector)
}

/// First matching element of the page in document order.
pub fn select_first(page: &Page, selector: &Selector) -> Option<ElementId> {
    page.document_order()
        .into_iter()
        .find(|id| id_matches(page, *id, selector))
}

/// All matching elements inside the subtree rooted at `root`, in document
/// order. The root itself participates.
pub fn select_within(page: &Page, root: ElementId, selector: &Selector) -> Vec<ElementId> {
    collect_matches(page, page.subtree(root), selector)
}

fn collect_matches(page: &Page, order: Vec<ElementId>, selector: &Selector) -> Vec<ElementId> {
    order
        .into_iter()
        .filter(|id| id_matches(page, *id, selector))
        .collect()
}

fn id_matches(page: &Page, id: ElementId, selector: &Selector) -> bool {
    page.element(id).is_some_and(|el| selector.matches(el))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::{Element, Viewport};
    use crate::model::page::Page;

    #[test]
    fn parses_class_chain() {
        let selector = Selector::parse(".todo-item.checked").expect("class chain");
        let mut el = Element::new("div").with_class("todo-item");
        assert!(!selector.matches(&el));
        el.add_class("checked");
        assert!(selector.matches(&el));
    }

    #[test]
    fn parses_union_of_alternatives() {
        let selector =
            Selector::parse(".intro-content, .skill-card, .todo-item").expect("union selector");
        assert!(selector.matches(&Element::new("div").with_class("skill-card")));
        assert!(selector.matches(&Element::new("li").with_class("todo-item")));
        assert!(!selector.matches(&Element::new("li").with_class("nav-link")));
    }

    #[test]
    fn parses_href_prefix_on_tag() {
        let selector = Selector::parse(r##"a[href^="#"]"##).expect("anchor selector");
        assert!(selector.matches(&Element::new("a").with_href("#together")));
        assert!(!selector.matches(&Element::new("a").with_href("https://example.com")));
        assert!(!selector.matches(&Element::new("div")));
    }

    #[test]
    fn parses_fragment_id() {
        let selector = Selector::parse("#why-me").expect("id selector");
        assert!(selector.matches(&Element::new("section").with_dom_id("why-me")));
        assert!(!selector.matches(&Element::new("section").with_dom_id("intro")));
    }

    #[test]
    fn rejects_unsupported_syntax() {
        let err = Selector::parse(".section > h2").expect_err("combinator unsupported");
        assert!(matches!(err, SelectorError::InvalidSelector { .. }));
        let err = Selector::parse("   ").expect_err("blank");
        assert!(matches!(err, SelectorError::Empty));
        let err = Selector::parse(".a, , .b").expect_err("empty alternative");
        assert!(matches!(err, SelectorError::InvalidSelector { .. }));
    }

    #[test]
    fn select_within_scopes_to_the_subtree() {
        let mut page = Page::new(Viewport::new(1200.0, 800.0));
        let body = page.body();
        let outside = page
            .append(body, Element::new("a").with_href("#intro"))
            .expect("outside anchor");
        let panel = page
            .append(body, Element::new("nav").with_class("mobile-menu"))
            .expect("panel");
        let list = page.append(panel, Element::new("ul")).expect("list");
        let inside = page
            .append(list, Element::new("a").with_href("#together"))
            .expect("inside anchor");

        let anchors = Selector::parse(r##"a[href^="#"]"##).expect("anchor selector");
        assert_eq!(select(&page, &anchors), vec![outside, inside]);
        assert_eq!(select_within(&page, panel, &anchors), vec![inside]);

        // The subtree root itself participates in matching.
        let panel_only = Selector::parse("nav.mobile-menu").expect("panel selector");
        assert_eq!(select_within(&page, panel, &panel_only), vec![panel]);
    }
}
