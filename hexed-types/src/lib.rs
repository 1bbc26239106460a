//! # hexed-types
//!
//! Shared types for the hexed byte-buffer engine.
//!
//! This crate provides the vocabulary used across all hexed crates:
//! - [`Operation`] - A recorded primitive edit that can reverse itself
//! - [`Fingerprint`], [`DigestKind`] - Content digests for change detection
//! - [`Encoding`], [`Endian`] - Textual byte literals (text, hex, bits, decimal)
//! - [`LiteralError`] - Error type for literal parsing

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod fingerprint;
mod literal;
mod operation;

pub use error::LiteralError;
pub use fingerprint::{DigestKind, Fingerprint, FINGERPRINT_SIZE};
pub use literal::{parse_literal, parse_offset, Encoding, Endian};
pub use operation::{Operation, OperationKind};
