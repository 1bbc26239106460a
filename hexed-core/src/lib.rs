//! # hexed-core
//!
//! Pure editing logic for hexed (no I/O, instant tests).
//!
//! This crate implements the byte-buffer state machines and algorithms
//! without any disk I/O, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no temp files, no mocks)
//! - Deterministic behavior (same edits → same bytes)
//! - Easy reasoning about undo/redo transitions
//!
//! The actual I/O (open, save, change detection) is performed by
//! `hexed-buffer`, which wraps a [`Document`] with a file binding.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod document;
pub mod history;
pub mod inspect;
pub mod search;

pub use content::ContentStore;
pub use document::Document;
pub use history::OperationLog;
pub use inspect::{inspect, Inspection, INSPECT_WINDOW};
pub use search::{count_matches, find, Direction};
