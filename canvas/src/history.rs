//! Bounded linear undo/redo over whole-page snapshots.
//!
//! The stack always holds at least one entry (the seed page loaded at mount).
//! `cursor` points at the entry the live page was last synced to. Committing
//! after an undo drops the redo branch; committing past capacity evicts the
//! oldest entry. None of the operations fail: moving past either end returns
//! `None`.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::doc::EditorState;

#[derive(Debug, Clone)]
pub struct History {
    states: VecDeque<EditorState>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Create a history seeded with one state. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(seed: EditorState, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut states = VecDeque::with_capacity(capacity);
        states.push_back(seed);
        Self { states, cursor: 0, capacity }
    }

    /// Append a state after the cursor, discarding any redo branch.
    pub fn commit(&mut self, state: EditorState) {
        self.states.truncate(self.cursor + 1);
        self.states.push_back(state);
        while self.states.len() > self.capacity {
            self.states.pop_front();
        }
        self.cursor = self.states.len() - 1;
    }

    /// Step back one entry. `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&EditorState> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.states.get(self.cursor)
    }

    /// Step forward one entry. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<&EditorState> {
        if self.cursor + 1 >= self.states.len() {
            return None;
        }
        self.cursor += 1;
        self.states.get(self.cursor)
    }

    /// The entry at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&EditorState> {
        self.states.get(self.cursor)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored entries, including the one at the cursor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the seed entry is never evicted without a replacement.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
