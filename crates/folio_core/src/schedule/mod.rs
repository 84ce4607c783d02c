//! Cooperative single-threaded scheduling.
//!
//! # Responsibility
//! - Provide the logical clock the embedder advances explicitly.
//! - Order timer and frame work deterministically so replays are exact.

pub mod scheduler;

pub use scheduler::{Scheduler, DEFAULT_FRAME_INTERVAL_MS};
