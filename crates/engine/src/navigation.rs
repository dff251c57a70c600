//! Selection and keyboard navigation.
//!
//! Any selection change ends an in-progress edit without committing it, so an
//! editing cell is always the only selected cell.

use variantgrid_core::{column_index, compute_selection, CellPosition, CellRange};

use crate::state::GridState;

impl GridState {
    pub(crate) fn select_cell(&mut self, position: CellPosition) {
        if position.row_index >= self.rows.len() {
            log::debug!("select_cell: row {} out of range", position.row_index);
            return;
        }
        self.clear_edit();
        self.selected_cells = vec![position.clone()];
        self.active_cell = Some(position.clone());
        self.extent = Some(position);
    }

    pub(crate) fn select_range(&mut self, range: CellRange) {
        if range.start.row_index >= self.rows.len() {
            log::debug!("select_range: anchor row {} out of range", range.start.row_index);
            return;
        }
        let Some(cells) = compute_selection(&range, &self.columns, self.rows.len()) else {
            log::debug!("select_range: unknown column in range");
            return;
        };
        self.clear_edit();
        self.selected_cells = cells;
        self.active_cell = Some(range.start);
        self.extent = Some(range.end);
    }

    pub(crate) fn extend_selection(&mut self, position: CellPosition) {
        let Some(active) = self.active_cell.clone() else {
            return;
        };
        let range = CellRange::new(active, position.clone());
        let Some(cells) = compute_selection(&range, &self.columns, self.rows.len()) else {
            log::debug!("extend_selection: unresolvable range");
            return;
        };
        self.clear_edit();
        self.selected_cells = cells;
        self.extent = Some(position);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected_cells.clear();
        self.active_cell = None;
        self.extent = None;
        self.clear_edit();
    }

    /// Move the active cell (or, with `extend`, the far corner of the
    /// selection) by a delta, clamped to the grid.
    pub(crate) fn move_active(&mut self, d_row: isize, d_col: isize, extend: bool) {
        let Some(active) = self.active_cell.clone() else {
            return;
        };
        if self.rows.is_empty() || self.columns.is_empty() {
            return;
        }
        let from = if extend {
            self.extent.clone().unwrap_or_else(|| active.clone())
        } else {
            active.clone()
        };
        let Some(target) = self.offset_position(&from, d_row, d_col) else {
            log::debug!("move_active: column {} not in schema", from.column_id);
            return;
        };

        if extend {
            self.extend_selection(target);
        } else {
            self.select_cell(target);
        }
    }

    fn offset_position(&self, from: &CellPosition, d_row: isize, d_col: isize) -> Option<CellPosition> {
        let col = column_index(&self.columns, &from.column_id)?;
        let max_row = self.rows.len() as isize - 1;
        let max_col = self.columns.len() as isize - 1;

        let row = (from.row_index as isize).saturating_add(d_row).clamp(0, max_row) as usize;
        let col = (col as isize).saturating_add(d_col).clamp(0, max_col) as usize;
        Some(CellPosition::new(row, self.columns[col].id.clone()))
    }
}
