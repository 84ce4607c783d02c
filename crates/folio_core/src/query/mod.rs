//! Element lookup over the page tree.
//!
//! # Responsibility
//! - Expose document-order selector queries to the behavior layer.
//! - Reject selector text the engine cannot faithfully evaluate.

pub mod selector;

pub use selector::{
    select, select_first, select_within, Selector, SelectorError, SelectorResult,
};
