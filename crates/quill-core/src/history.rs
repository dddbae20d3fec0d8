//! Linear undo/redo history of buffer snapshots
//!
//! The history keeps two LIFO stacks of [`HistoryEntry`] snapshots. The caller
//! records the pre-edit state before every mutation; undo and redo trade the
//! live state for the top of one stack while pushing it onto the other, so the
//! two stacks stay mutually invertible:
//!
//! - `record_before_edit` pushes onto undo and clears redo
//! - `undo` pops undo, pushes the live state onto redo
//! - `redo` pops redo, pushes the live state onto undo
//!
//! Undo immediately followed by redo restores the exact pre-undo buffer and
//! selection.
//!
//! Stacks are unbounded unless a capacity is set with
//! [`History::with_capacity`], in which case the oldest snapshots are dropped
//! first.
//!
//! # Example
//!
//! ```ignore
//! use quill_core::{History, SelectionRange};
//!
//! let mut history = History::new();
//! history.record_before_edit("", SelectionRange::caret(0));
//! // ... buffer becomes "a" ...
//! let restored = history.undo("a", SelectionRange::caret(1)).unwrap();
//! assert_eq!(restored.buffer, "");
//! ```

use crate::selection::SelectionRange;
use serde::{Deserialize, Serialize};

/// A snapshot of the buffer and selection taken before an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub buffer: String,
    pub selection: SelectionRange,
}

impl HistoryEntry {
    pub fn new(buffer: impl Into<String>, selection: SelectionRange) -> Self {
        Self {
            buffer: buffer.into(),
            selection,
        }
    }
}

/// Undo and redo stacks for one editing session.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    /// Maximum entries per stack; `None` means unbounded
    capacity: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history keeping at most `capacity` entries per stack.
    ///
    /// A capacity of zero is raised to one so the last edit can always be
    /// undone.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    /// The per-stack capacity, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Snapshot the pre-edit state. Any pending redo history is discarded.
    pub fn record_before_edit(&mut self, buffer: &str, selection: SelectionRange) {
        self.redo_stack.clear();
        push_bounded(
            &mut self.undo_stack,
            HistoryEntry::new(buffer, selection),
            self.capacity,
        );
    }

    /// Step back one snapshot.
    ///
    /// Returns `None` without touching either stack when there is nothing to
    /// undo. Otherwise the live state moves onto the redo stack and the
    /// restored snapshot is returned for the caller to apply.
    pub fn undo(&mut self, buffer: &str, selection: SelectionRange) -> Option<HistoryEntry> {
        let restored = self.undo_stack.pop()?;
        push_bounded(
            &mut self.redo_stack,
            HistoryEntry::new(buffer, selection),
            self.capacity,
        );
        Some(restored)
    }

    /// Step forward one snapshot. Mirror image of [`History::undo`].
    pub fn redo(&mut self, buffer: &str, selection: SelectionRange) -> Option<HistoryEntry> {
        let restored = self.redo_stack.pop()?;
        push_bounded(
            &mut self.undo_stack,
            HistoryEntry::new(buffer, selection),
            self.capacity,
        );
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut Vec<HistoryEntry>, entry: HistoryEntry, capacity: Option<usize>) {
    stack.push(entry);
    if let Some(cap) = capacity {
        if stack.len() > cap {
            let excess = stack.len() - cap;
            stack.drain(..excess);
        }
    }
}
