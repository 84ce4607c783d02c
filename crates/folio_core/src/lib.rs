//! Deterministic interaction engine for the folio page.
//! Owns the page model, event routing and all timed behavior.

pub mod behavior;
pub mod controller;
pub mod event;
pub mod logging;
pub mod model;
pub mod observe;
pub mod query;
pub mod schedule;

pub use controller::{ControllerConfig, PageController};
pub use event::PageEvent;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::element::{Element, ElementId, Rect, Viewport, MOBILE_BREAKPOINT_PX};
pub use model::page::{Page, PageError, PageResult, ScrollBehavior, ScrollRequest};
pub use query::{select, select_first, select_within, Selector, SelectorError, SelectorResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
