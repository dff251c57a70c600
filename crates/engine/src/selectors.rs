//! Derived, read-only views of the grid state.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::row::GridRow;
use crate::state::GridState;

/// Rows the caller must send on save, partitioned by operation.
///
/// A row that was added and then deleted never reached the server, so it
/// appears in none of the lists. Neither does a deletion that was already
/// saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlan<'a> {
    pub created: Vec<&'a GridRow>,
    pub updated: Vec<&'a GridRow>,
    pub deleted: Vec<&'a GridRow>,
}

impl SavePlan<'_> {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }
}

impl GridState {
    /// Distinct row indices touched by the selection, ascending.
    pub fn selected_row_indices(&self) -> Vec<usize> {
        let rows: BTreeSet<usize> = self.selected_cells.iter().map(|c| c.row_index).collect();
        rows.into_iter().collect()
    }

    pub fn is_cell_selected(&self, row_index: usize, column_id: &str) -> bool {
        self.selected_cells.iter().any(|c| c.is(row_index, column_id))
    }

    pub fn is_cell_active(&self, row_index: usize, column_id: &str) -> bool {
        self.active_cell.as_ref().is_some_and(|c| c.is(row_index, column_id))
    }

    pub fn is_cell_editing(&self, row_index: usize, column_id: &str) -> bool {
        self.editing_cell.as_ref().is_some_and(|c| c.is(row_index, column_id))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn dirty_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_dirty).count()
    }

    pub fn save_plan(&self) -> SavePlan<'_> {
        let mut plan = SavePlan::default();
        for row in &self.rows {
            let row = row.as_ref();
            match (row.is_new, row.is_deleted) {
                (true, false) => plan.created.push(row),
                (false, true) if row.is_dirty => plan.deleted.push(row),
                (false, false) if row.is_dirty => plan.updated.push(row),
                _ => {}
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use crate::action::GridAction;
    use crate::harness::{loaded_state, pos};
    use crate::value::CellValue;
    use variantgrid_core::CellRange;

    #[test]
    fn selected_rows_are_distinct_and_sorted() {
        let mut state = loaded_state();
        state.dispatch(GridAction::SelectRange {
            range: CellRange::new(pos(2, "price"), pos(0, "sku")),
        });
        assert_eq!(state.selected_row_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn cell_predicates() {
        let mut state = loaded_state();
        state.dispatch(GridAction::StartEditing { position: pos(1, "stock") });
        assert!(state.is_cell_selected(1, "stock"));
        assert!(state.is_cell_active(1, "stock"));
        assert!(state.is_cell_editing(1, "stock"));
        assert!(!state.is_cell_editing(1, "price"));
    }

    #[test]
    fn save_plan_partitions_rows() {
        let mut state = loaded_state();
        state.dispatch(GridAction::UpdateCell {
            row_index: 0,
            column_id: "price".into(),
            value: CellValue::Number(11.0),
        });
        state.dispatch(GridAction::DeleteRows { indices: vec![1] });
        state.dispatch(GridAction::AddRow { seed: None });
        state.dispatch(GridAction::AddRow { seed: None });
        state.dispatch(GridAction::DeleteRows { indices: vec![4] });

        let plan = state.save_plan();
        assert_eq!(plan.updated.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["v1"]);
        assert_eq!(plan.deleted.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["v2"]);
        assert_eq!(plan.created.len(), 1);
        assert_eq!(plan.len(), 3);
        assert_eq!(state.dirty_row_count(), 4);
    }

    #[test]
    fn clean_grid_has_empty_plan() {
        let state = loaded_state();
        assert!(state.save_plan().is_empty());
        assert_eq!(state.dirty_row_count(), 0);
    }
}
