//! In-memory page model.
//!
//! # Responsibility
//! - Define the element/page shapes every behavior family works against.
//! - Keep all state tab-scoped: nothing here survives the `Page` value.
//!
//! # Invariants
//! - One mobile breakpoint constant serves every consumer.
//! - Structural mutation goes through `Page`; elements never rewire
//!   themselves.

pub mod element;
pub mod page;
