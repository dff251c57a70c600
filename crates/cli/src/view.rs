//! Serializable projections of a finished grid, for stdout.

use serde::Serialize;
use variantgrid_core::{CellPosition, GridColumn};
use variantgrid_engine::{GridRow, GridState};

/// Everything a renderer would read from the grid.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView<'a> {
    pub rows: Vec<&'a GridRow>,
    pub columns: &'a [GridColumn],
    pub selected_cells: &'a [CellPosition],
    pub selected_row_indices: Vec<usize>,
    pub active_cell: Option<&'a CellPosition>,
    pub editing_cell: Option<&'a CellPosition>,
    pub edit_value: &'a str,
    pub clipboard_rows: usize,
    pub is_dirty: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl<'a> StateView<'a> {
    pub fn new(state: &'a GridState) -> Self {
        Self {
            rows: state.rows().iter().map(|r| r.as_ref()).collect(),
            columns: state.columns(),
            selected_cells: state.selected_cells(),
            selected_row_indices: state.selected_row_indices(),
            active_cell: state.active_cell(),
            editing_cell: state.editing_cell(),
            edit_value: state.edit_value(),
            clipboard_rows: state.clipboard_rows().len(),
            is_dirty: state.is_dirty(),
            can_undo: state.can_undo(),
            can_redo: state.can_redo(),
        }
    }
}

/// Counts only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub actions: usize,
    pub rows: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub dirty_rows: usize,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub is_dirty: bool,
}

impl Summary {
    pub fn new(state: &GridState, actions: usize) -> Self {
        let plan = state.save_plan();
        Self {
            actions,
            rows: state.row_count(),
            created: plan.created.len(),
            updated: plan.updated.len(),
            deleted: plan.deleted.len(),
            dirty_rows: state.dirty_row_count(),
            undo_depth: state.history().undo_len(),
            redo_depth: state.history().redo_len(),
            is_dirty: state.is_dirty(),
        }
    }

    /// `key: value` lines for terminals.
    pub fn to_text(&self) -> String {
        format!(
            "actions:    {}\nrows:       {}\ncreated:    {}\nupdated:    {}\ndeleted:    {}\ndirty rows: {}\nundo:       {}\nredo:       {}\nunsaved:    {}\n",
            self.actions,
            self.rows,
            self.created,
            self.updated,
            self.deleted,
            self.dirty_rows,
            self.undo_depth,
            self.redo_depth,
            if self.is_dirty { "yes" } else { "no" },
        )
    }
}
