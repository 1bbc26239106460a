//! Content store for hexed.
//!
//! This module owns the byte sequence itself. Every mutation:
//! - Clamps or ignores out-of-range offsets instead of failing
//! - Returns the [`Operation`] it performed, ready to be logged
//!
//! The store knows nothing about undo stacks; [`crate::OperationLog`]
//! replays the returned operations through [`ContentStore::apply`] and
//! [`ContentStore::revert`].

use hexed_types::Operation;

/// A contiguous, fully materialized byte sequence.
///
/// Size is always `as_bytes().len()`; it is never cached separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStore {
    bytes: Vec<u8>,
}

impl ContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of bytes in the store.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The full content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte at `offset`, or `None` past the end.
    pub fn get(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// Up to `count` bytes starting at `offset`.
    ///
    /// Clipped to the end of the content; empty if `offset` is out of range.
    pub fn get_range(&self, offset: usize, count: usize) -> Vec<u8> {
        if offset >= self.bytes.len() {
            return Vec::new();
        }
        let end = offset.saturating_add(count).min(self.bytes.len());
        self.bytes[offset..end].to_vec()
    }

    /// Replace the whole content (used when loading from disk).
    pub fn reset(&mut self, bytes: Vec<u8>) {
        self.bytes = bytes;
    }

    /// Splice `data` in at `offset`, clamped into `[0, len]`.
    ///
    /// Always succeeds; an empty `data` still yields an operation.
    pub fn insert(&mut self, offset: usize, data: &[u8]) -> Operation {
        let offset = offset.min(self.bytes.len());
        self.bytes.splice(offset..offset, data.iter().copied());
        Operation::Insert {
            offset,
            data: data.to_vec(),
        }
    }

    /// Remove up to `count` bytes starting at `offset`.
    ///
    /// Returns `None` (and changes nothing) if `offset` is past the last byte
    /// or `count` is zero. `count` is clamped to the bytes available.
    pub fn delete(&mut self, offset: usize, count: usize) -> Option<Operation> {
        if offset >= self.bytes.len() || count == 0 {
            return None;
        }
        let end = offset.saturating_add(count).min(self.bytes.len());
        let data: Vec<u8> = self.bytes.drain(offset..end).collect();
        Some(Operation::Delete { offset, data })
    }

    /// Overwrite the byte at `offset`.
    ///
    /// Returns `None` (and changes nothing) if `offset` is past the last byte.
    pub fn replace(&mut self, offset: usize, byte: u8) -> Option<Operation> {
        let slot = self.bytes.get_mut(offset)?;
        let old = std::mem::replace(slot, byte);
        Some(Operation::Replace {
            offset,
            old,
            new: byte,
        })
    }

    /// Re-apply the forward effect of a recorded operation.
    ///
    /// Returns `false` without touching the content if the operation does not
    /// fit the current length. Operations recorded against this store always
    /// fit when replayed in log order.
    pub fn apply(&mut self, op: &Operation) -> bool {
        match op {
            Operation::Insert { offset, data } => {
                if *offset > self.bytes.len() {
                    return false;
                }
                self.bytes.splice(*offset..*offset, data.iter().copied());
            }
            Operation::Delete { offset, data } => {
                let Some(end) = offset.checked_add(data.len()) else {
                    return false;
                };
                if end > self.bytes.len() {
                    return false;
                }
                self.bytes.drain(*offset..end);
            }
            Operation::Replace { offset, new, .. } => match self.bytes.get_mut(*offset) {
                Some(slot) => *slot = *new,
                None => return false,
            },
        }
        true
    }

    /// Undo a recorded operation by applying its inverse.
    pub fn revert(&mut self, op: &Operation) -> bool {
        self.apply(&op.inverse())
    }
}
