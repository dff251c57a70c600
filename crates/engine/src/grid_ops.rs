//! Whole-grid and row-level operations: load, schema, add, delete, save.

use std::collections::BTreeSet;
use std::sync::Arc;

use variantgrid_core::GridColumn;

use crate::row::{GridRow, RowSeed};
use crate::state::GridState;

impl GridState {
    /// Initial load. Resets history and the dirty flag; the clipboard survives.
    pub(crate) fn set_rows(&mut self, rows: Vec<GridRow>) {
        log::debug!("set_rows: {} rows", rows.len());
        self.rows = rows.into_iter().map(Arc::new).collect();
        self.history.clear();
        self.is_dirty = false;
        self.prune_selection();
    }

    pub(crate) fn set_columns(&mut self, columns: Vec<GridColumn>) {
        self.columns = columns;
    }

    /// Soft delete: rows stay in place, flagged for the save round-trip.
    pub(crate) fn delete_rows(&mut self, indices: &[usize]) {
        let targets: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.rows.len())
            .collect();
        if targets.is_empty() {
            log::debug!("delete_rows: no valid indices in {:?}", indices);
            return;
        }

        self.record_undo();
        for index in targets {
            let row = self.row_mut(index);
            row.is_deleted = true;
            row.is_dirty = true;
        }
        self.clear_selection();
    }

    pub(crate) fn add_row(&mut self, seed: Option<RowSeed>) {
        let mut seed = seed.unwrap_or_default();
        let id = match seed.id.take() {
            Some(id) => id,
            None => self.ids.next_id(),
        };
        let mut row = GridRow::with_defaults(id, &self.new_row);
        seed.apply_to(&mut row);
        row.is_new = true;
        row.is_dirty = true;

        self.record_undo();
        self.rows.push(Arc::new(row));
    }

    /// Clear per-row `is_new`/`is_dirty` after a successful save. Deleted
    /// rows keep their flag; history is left alone.
    pub(crate) fn mark_saved(&mut self) {
        for row in &mut self.rows {
            if row.is_new || row.is_dirty {
                let row = Arc::make_mut(row);
                row.is_new = false;
                row.is_dirty = false;
            }
        }
        self.is_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::action::GridAction;
    use crate::harness::{loaded_state, pos};
    use crate::ids::is_unsaved_id;
    use crate::row::RowSeed;

    #[test]
    fn delete_is_soft_and_clears_selection() {
        let mut state = loaded_state();
        state.dispatch(GridAction::SelectCell { position: pos(1, "sku") });
        state.dispatch(GridAction::DeleteRows { indices: vec![1, 7] });

        assert_eq!(state.row_count(), 3);
        assert!(state.rows()[1].is_deleted);
        assert!(state.rows()[1].is_dirty);
        assert!(!state.rows()[0].is_deleted);
        assert!(state.selected_cells().is_empty());
        assert!(state.active_cell().is_none());
        assert_eq!(state.history().undo_len(), 1);
    }

    #[test]
    fn delete_with_no_valid_index_is_noop() {
        let mut state = loaded_state();
        state.dispatch(GridAction::DeleteRows { indices: vec![5, 9] });
        assert!(!state.is_dirty());
        assert!(!state.can_undo());
    }

    #[test]
    fn add_row_uses_defaults_and_fresh_id() {
        let mut state = loaded_state();
        state.dispatch(GridAction::AddRow { seed: None });
        let row = &state.rows()[3];
        assert!(is_unsaved_id(&row.id));
        assert!(row.is_new && row.is_dirty && !row.is_deleted);
        assert_eq!(row.price, 0.0);
        assert_eq!(row.low_stock_threshold, 5.0);
        assert!(row.enabled);
        assert!(state.is_dirty());
    }

    #[test]
    fn add_row_ids_are_unique() {
        let mut state = loaded_state();
        state.dispatch(GridAction::AddRow { seed: None });
        state.dispatch(GridAction::AddRow { seed: None });
        assert_ne!(state.rows()[3].id, state.rows()[4].id);
    }

    #[test]
    fn add_row_applies_seed() {
        let mut state = loaded_state();
        state.dispatch(GridAction::AddRow {
            seed: Some(RowSeed {
                id: Some("draft-1".into()),
                sku: Some("TEE-010".into()),
                price: Some(20.0),
                ..RowSeed::default()
            }),
        });
        let row = &state.rows()[3];
        assert_eq!(row.id, "draft-1");
        assert_eq!(row.sku.as_deref(), Some("TEE-010"));
        assert_eq!(row.price, 20.0);
        assert!(row.is_new);
    }

    #[test]
    fn mark_saved_keeps_deleted_flag_and_history() {
        let mut state = loaded_state();
        state.dispatch(GridAction::AddRow { seed: None });
        state.dispatch(GridAction::DeleteRows { indices: vec![0] });
        state.dispatch(GridAction::MarkSaved);

        assert!(!state.is_dirty());
        assert!(state.rows().iter().all(|r| !r.is_new && !r.is_dirty));
        assert!(state.rows()[0].is_deleted);
        assert_eq!(state.history().undo_len(), 2);
    }

    #[test]
    fn set_rows_resets_history() {
        let mut state = loaded_state();
        state.dispatch(GridAction::AddRow { seed: None });
        state.dispatch(GridAction::CopyRows { indices: vec![0] });
        state.dispatch(GridAction::SetRows { rows: crate::harness::rows() });
        assert!(!state.is_dirty());
        assert!(!state.can_undo());
        assert!(!state.can_redo());
        assert_eq!(state.clipboard_rows().len(), 1);
    }
}
