//! Undo/redo log for hexed.
//!
//! Two LIFO stacks of [`Operation`]s:
//! - `undo`: operations applied to the content, newest last
//! - `redo`: operations reverted by undo, newest last
//!
//! Recording a new operation discards the redo stack, so redo is only ever
//! the immediate continuation of the undo chain. An operation moves between
//! stacks only after the content accepted it.

use hexed_types::Operation;

use crate::ContentStore;

/// Undo and redo stacks of recorded operations.
#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    /// Applied operations, newest last.
    undo: Vec<Operation>,
    /// Reverted operations, newest last.
    redo: Vec<Operation>,
}

impl OperationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly applied operation.
    ///
    /// Clears the redo stack.
    pub fn record(&mut self, op: Operation) {
        self.undo.push(op);
        self.redo.clear();
    }

    /// Revert the newest applied operation on `content`.
    ///
    /// Returns `false` if there is nothing to undo.
    pub fn undo(&mut self, content: &mut ContentStore) -> bool {
        let Some(op) = self.undo.last() else {
            return false;
        };
        if !content.revert(op) {
            return false;
        }
        if let Some(op) = self.undo.pop() {
            self.redo.push(op);
        }
        true
    }

    /// Re-apply the newest reverted operation on `content`.
    ///
    /// Returns `false` if there is nothing to redo.
    pub fn redo(&mut self, content: &mut ContentStore) -> bool {
        let Some(op) = self.redo.last() else {
            return false;
        };
        if !content.apply(op) {
            return false;
        }
        if let Some(op) = self.redo.pop() {
            self.undo.push(op);
        }
        true
    }

    /// Check if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check if there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of operations on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of operations on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// The operation the next undo would revert.
    pub fn peek_undo(&self) -> Option<&Operation> {
        self.undo.last()
    }

    /// The operation the next redo would re-apply.
    pub fn peek_redo(&self) -> Option<&Operation> {
        self.redo.last()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
