//! Undo and redo over row snapshots.
//!
//! Only rows are restored. Selection is kept, minus any cells that no longer
//! exist in the restored row set; the clipboard and schema are untouched.

use crate::state::GridState;

impl GridState {
    pub(crate) fn undo(&mut self) {
        let current = self.rows.clone();
        let Some(previous) = self.history.undo(current) else {
            return;
        };
        self.rows = previous;
        self.is_dirty = self.history.can_undo();
        self.prune_selection();
    }

    pub(crate) fn redo(&mut self) {
        let current = self.rows.clone();
        let Some(next) = self.history.redo(current) else {
            return;
        };
        self.rows = next;
        self.is_dirty = true;
        self.prune_selection();
    }
}
