//! Editable document: content, history, and the modified flag.
//!
//! [`Document`] is the state machine behind a buffer. It routes every edit
//! through the [`ContentStore`], records the resulting operation in the
//! [`OperationLog`], and keeps `modified` consistent:
//!
//! | Event              | `modified` afterwards       |
//! |--------------------|-----------------------------|
//! | successful edit    | `true`                      |
//! | undo               | `can_undo()`                |
//! | redo               | `true` (never re-derived)   |
//! | `mark_saved`/load  | `false`                     |

use hexed_types::Operation;

use crate::search::{self, Direction};
use crate::{ContentStore, OperationLog};

/// Byte content with undo/redo history.
#[derive(Debug, Clone, Default)]
pub struct Document {
    content: ContentStore,
    log: OperationLog,
    modified: bool,
}

impl Document {
    /// Create an empty, unmodified document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unmodified document holding `bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            content: ContentStore::from_bytes(bytes),
            log: OperationLog::new(),
            modified: false,
        }
    }

    /// Number of bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// The full content.
    pub fn data(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Byte at `offset`, or `None` past the end.
    pub fn get_byte(&self, offset: usize) -> Option<u8> {
        self.content.get(offset)
    }

    /// Up to `count` bytes from `offset`, clipped to the end.
    pub fn get_bytes(&self, offset: usize, count: usize) -> Vec<u8> {
        self.content.get_range(offset, count)
    }

    /// Insert `data` at `offset` (clamped to the end).
    pub fn insert(&mut self, offset: usize, data: &[u8]) {
        let op = self.content.insert(offset, data);
        self.commit(op);
    }

    /// Delete up to `count` bytes at `offset`. No-op when out of range.
    pub fn delete(&mut self, offset: usize, count: usize) {
        if let Some(op) = self.content.delete(offset, count) {
            self.commit(op);
        }
    }

    /// Overwrite one byte. No-op when out of range.
    pub fn replace(&mut self, offset: usize, byte: u8) {
        if let Some(op) = self.content.replace(offset, byte) {
            self.commit(op);
        }
    }

    /// Overwrite bytes starting at `offset`, extending past the end.
    ///
    /// Each position inside the content becomes one `Replace`; each position
    /// at or past the end becomes one single-byte `Insert` at the end. A
    /// paste straddling the end therefore takes one undo per byte.
    pub fn replace_bytes(&mut self, offset: usize, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            let pos = offset.saturating_add(i);
            if pos >= self.content.len() {
                self.insert(self.content.len(), &[byte]);
            } else {
                self.replace(pos, byte);
            }
        }
    }

    /// Revert the newest edit. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        if !self.log.undo(&mut self.content) {
            return false;
        }
        self.modified = self.log.can_undo();
        true
    }

    /// Re-apply the newest undone edit. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        if !self.log.redo(&mut self.content) {
            return false;
        }
        self.modified = true;
        true
    }

    /// Check if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Check if there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// Read access to the history.
    pub fn history(&self) -> &OperationLog {
        &self.log
    }

    /// Whether the content changed since the last load or save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Checkpoint after a save: history is dropped and the document is clean.
    pub fn mark_saved(&mut self) {
        self.log.clear();
        self.modified = false;
    }

    /// Replace the whole content with freshly loaded bytes.
    pub fn load(&mut self, bytes: Vec<u8>) {
        self.content.reset(bytes);
        self.mark_saved();
    }

    /// Find `pattern` starting from `start`. See [`search::find`].
    pub fn find(&self, pattern: &[u8], start: usize, direction: Direction) -> Option<usize> {
        search::find(self.content.as_bytes(), pattern, start, direction)
    }

    /// Count possibly overlapping occurrences of `pattern`.
    pub fn count_matches(&self, pattern: &[u8]) -> usize {
        search::count_matches(self.content.as_bytes(), pattern)
    }

    fn commit(&mut self, op: Operation) {
        self.log.record(op);
        self.modified = true;
    }
}
