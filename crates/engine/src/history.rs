//! Undo/Redo history for grid mutations
//!
//! Each entry is the full row array captured just before a mutating action.
//! Rows are reference-counted, so a snapshot only clones the spine of the
//! array; a row's data is copied when that row is next written.

use std::collections::VecDeque;
use std::sync::Arc;

use variantgrid_config::MAX_HISTORY_LIMIT;

use crate::row::GridRow;

pub type RowSnapshot = Vec<Arc<GridRow>>;

pub const DEFAULT_MAX_ENTRIES: usize = MAX_HISTORY_LIMIT;

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<RowSnapshot>,
    redo_stack: Vec<RowSnapshot>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_ENTRIES)
    }

    /// `max_entries` is clamped to `1..=DEFAULT_MAX_ENTRIES`.
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.clamp(1, DEFAULT_MAX_ENTRIES),
        }
    }

    /// Record the pre-mutation rows. Clears the redo stack.
    pub fn record(&mut self, snapshot: RowSnapshot) {
        self.push_undo(snapshot);
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: RowSnapshot) {
        self.undo_stack.push_back(snapshot);

        // Limit history size
        if self.undo_stack.len() > self.max_entries {
            self.undo_stack.pop_front();
            log::debug!("undo history full, evicted oldest entry");
        }
    }

    /// Pop the last snapshot for undo; `current` becomes the redo entry.
    pub fn undo(&mut self, current: RowSnapshot) -> Option<RowSnapshot> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Pop from the redo stack; `current` goes back onto the undo stack.
    pub fn redo(&mut self, current: RowSnapshot) -> Option<RowSnapshot> {
        let next = self.redo_stack.pop()?;
        self.push_undo(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Oldest snapshot still held.
    pub fn oldest(&self) -> Option<&RowSnapshot> {
        self.undo_stack.front()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
