//! Bounded undo/redo stacks over full object-sequence snapshots.

use crate::objects::DrawObject;
use std::collections::VecDeque;

/// Maximum number of entries kept on each stack.
pub const MAX_HISTORY: usize = 100;

/// Undo/redo log operating on deep-copy snapshots of the object sequence.
///
/// Snapshots are taken *before* a mutation is applied. Any new commit after
/// an undo discards the redo stack: redo is only valid immediately after an
/// undo with no intervening edit.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: VecDeque<Vec<DrawObject>>,
    future: Vec<Vec<DrawObject>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current objects onto the past stack, evicting the oldest
    /// entry beyond capacity, and clear the redo branch.
    pub fn commit(&mut self, objects: &[DrawObject]) {
        self.past.push_back(objects.to_vec());
        if self.past.len() > MAX_HISTORY {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Swap the current objects with the most recent past snapshot.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self, objects: &mut Vec<DrawObject>) -> bool {
        let Some(snapshot) = self.past.pop_back() else {
            return false;
        };
        self.future.push(std::mem::replace(objects, snapshot));
        if self.future.len() > MAX_HISTORY {
            self.future.remove(0);
        }
        true
    }

    /// Swap the current objects with the most recent redo snapshot.
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self, objects: &mut Vec<DrawObject>) -> bool {
        let Some(snapshot) = self.future.pop() else {
            return false;
        };
        self.past.push_back(std::mem::replace(objects, snapshot));
        if self.past.len() > MAX_HISTORY {
            self.past.pop_front();
        }
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo entries currently held.
    pub fn past_len(&self) -> usize {
        self.past.len()
    }
}
