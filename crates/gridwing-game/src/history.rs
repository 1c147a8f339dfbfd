use std::{collections::VecDeque, num::NonZero};

use gridwing_core::{Board, Note};

/// One immutable point-in-time state of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) board: Board,
    pub(crate) notes: Vec<Note>,
}

/// Bounded undo/redo ring of immutable snapshots.
///
/// Pushing while undone truncates the redo tail; pushing at capacity
/// drops the oldest snapshot. The current snapshot is always retained,
/// so undo history shrinks from the far end first.
#[derive(Debug, Clone)]
pub(crate) struct History {
    snapshots: VecDeque<Snapshot>,
    capacity: NonZero<usize>,
    cursor: usize,
}

impl History {
    pub(crate) fn new(capacity: NonZero<usize>, initial: Snapshot) -> Self {
        let mut snapshots = VecDeque::with_capacity(capacity.get());
        snapshots.push_back(initial);
        Self {
            snapshots,
            capacity,
            cursor: 0,
        }
    }

    pub(crate) fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        if snapshot == *self.current() {
            return;
        }

        let keep = self.cursor + 1;
        if keep < self.snapshots.len() {
            self.snapshots.truncate(keep);
        }

        if self.snapshots.len() == self.capacity.get() {
            self.snapshots.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }

        self.snapshots.push_back(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    pub(crate) fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub(crate) fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub(crate) fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub(crate) fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}
