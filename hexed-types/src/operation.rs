//! Recorded edit operations.
//!
//! An [`Operation`] carries enough data to reverse itself exactly: the
//! offset it was applied at plus every byte it added or removed. Undo applies
//! [`Operation::inverse`]; redo applies the operation as recorded.

use serde::{Deserialize, Serialize};
use std::slice;

/// Discriminant of an [`Operation`], useful for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Bytes spliced in.
    Insert,
    /// Bytes removed.
    Delete,
    /// One byte overwritten.
    Replace,
}

/// A primitive edit against a byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Operation {
    /// `data` was inserted at `offset`.
    Insert {
        /// Index the first inserted byte landed at.
        offset: usize,
        /// The inserted bytes.
        data: Vec<u8>,
    },
    /// `data` was removed starting at `offset`.
    Delete {
        /// Index of the first removed byte.
        offset: usize,
        /// The removed bytes.
        data: Vec<u8>,
    },
    /// The byte at `offset` changed from `old` to `new`.
    Replace {
        /// Index of the overwritten byte.
        offset: usize,
        /// Byte value before the edit.
        old: u8,
        /// Byte value after the edit.
        new: u8,
    },
}

impl Operation {
    /// The variant of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Insert { .. } => OperationKind::Insert,
            Operation::Delete { .. } => OperationKind::Delete,
            Operation::Replace { .. } => OperationKind::Replace,
        }
    }

    /// Offset into the content at the time the operation was applied.
    pub fn offset(&self) -> usize {
        match self {
            Operation::Insert { offset, .. }
            | Operation::Delete { offset, .. }
            | Operation::Replace { offset, .. } => *offset,
        }
    }

    /// Bytes removed or overwritten (empty for inserts).
    pub fn old_data(&self) -> &[u8] {
        match self {
            Operation::Insert { .. } => &[],
            Operation::Delete { data, .. } => data,
            Operation::Replace { old, .. } => slice::from_ref(old),
        }
    }

    /// Bytes inserted or the overwrite value (empty for deletes).
    pub fn new_data(&self) -> &[u8] {
        match self {
            Operation::Insert { data, .. } => data,
            Operation::Delete { .. } => &[],
            Operation::Replace { new, .. } => slice::from_ref(new),
        }
    }

    /// Change in content length when this operation is applied.
    pub fn size_delta(&self) -> isize {
        self.new_data().len() as isize - self.old_data().len() as isize
    }

    /// The operation that undoes this one.
    ///
    /// Total over all variants, and an involution:
    /// `op.inverse().inverse() == op`.
    pub fn inverse(&self) -> Operation {
        match self {
            Operation::Insert { offset, data } => Operation::Delete {
                offset: *offset,
                data: data.clone(),
            },
            Operation::Delete { offset, data } => Operation::Insert {
                offset: *offset,
                data: data.clone(),
            },
            Operation::Replace { offset, old, new } => Operation::Replace {
                offset: *offset,
                old: *new,
                new: *old,
            },
        }
    }
}
