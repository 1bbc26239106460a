//! # hexed-buffer
//!
//! File-backed byte buffer for the hexed editor engine.
//!
//! This crate binds a [`hexed_core::Document`] to a file and guards the
//! file against silent overwrites:
//!
//! ```text
//! open ──► read ──► fingerprint ──► Document (edit, undo, redo, search)
//!                        │                    │
//!                        ▼                    ▼
//!        has_changed_on_disk ◄── re-read   save ──► write ──► re-fingerprint
//! ```
//!
//! 1. `open` reads the whole file and records its fingerprint
//! 2. Edits only touch memory; the fingerprint is left alone
//! 3. `has_changed_on_disk` re-reads the file and compares fingerprints
//! 4. `save` writes the content, re-fingerprints it, and clears history
//!
//! File access goes through the [`FileStore`] trait. [`DiskStore`] is the
//! default; [`MemoryStore`] is for tests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use hexed_buffer::{Buffer, BufferError};
//!
//! # fn example() -> Result<(), BufferError> {
//! let mut buffer = Buffer::open("firmware.bin")?;
//! buffer.replace_bytes(0x10, &[0xDE, 0xAD, 0xBE, 0xEF]);
//!
//! if !buffer.has_changed_on_disk()? {
//!     buffer.save()?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod buffer;
mod error;
mod store;

pub use buffer::Buffer;
pub use error::{BufferError, Result};
pub use store::{DiskStore, FileStore, MemoryStore};

pub use hexed_core::Direction;
pub use hexed_types::{DigestKind, Fingerprint};
