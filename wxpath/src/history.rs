//! Snapshot-based undo/redo owned by the editor.

use serde_json::Value;

/// Bounded list of scene snapshots with a cursor on the current one.
#[derive(Clone, Debug)]
pub struct HistoryStack {
    snapshots: Vec<Value>,
    cursor: usize,
    capacity: usize,
}

impl HistoryStack {
    pub fn new(capacity: usize) -> Self {
        HistoryStack {
            snapshots: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.trim();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn current(&self) -> Option<&Value> {
        self.snapshots.get(self.cursor)
    }

    /// Record a new state. Anything past the cursor is discarded; identical
    /// consecutive snapshots are collapsed.
    pub fn push(&mut self, snapshot: Value) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
            if self.snapshots.last() == Some(&snapshot) {
                return;
            }
        }
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
        self.trim();
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Step back and return the snapshot to restore.
    pub fn undo(&mut self) -> Option<&Value> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    pub fn redo(&mut self) -> Option<&Value> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }

    fn trim(&mut self) {
        if self.snapshots.len() > self.capacity {
            let excess = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}
