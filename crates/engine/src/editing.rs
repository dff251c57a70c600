//! Cell writes and the in-place edit lifecycle.
//!
//! `START_EDITING` seeds the edit buffer from the cell's current value;
//! `COMMIT_EDIT` parses the buffer for the column's type and writes it as one
//! undoable change. Cancelling never touches rows or history.

use variantgrid_core::{CellPosition, ColumnKey, ColumnKind};

use crate::parse::parse_input;
use crate::state::GridState;
use crate::value::CellValue;

impl GridState {
    pub(crate) fn update_cell(&mut self, row_index: usize, column_id: &str, value: CellValue) {
        if row_index >= self.rows.len() {
            log::debug!("update_cell: row {} out of range", row_index);
            return;
        }
        self.write_cell(row_index, column_id, value);
    }

    pub(crate) fn start_editing(&mut self, position: CellPosition) {
        let Some(row) = self.rows.get(position.row_index) else {
            log::debug!("start_editing: row {} out of range", position.row_index);
            return;
        };
        let seed = row.get(&self.resolve_key(&position.column_id)).to_edit_string();

        self.edit_value = seed;
        self.selected_cells = vec![position.clone()];
        self.active_cell = Some(position.clone());
        self.extent = Some(position.clone());
        self.editing_cell = Some(position);
    }

    pub(crate) fn set_edit_value(&mut self, value: String) {
        self.edit_value = value;
    }

    pub(crate) fn commit_edit(&mut self) {
        let Some(position) = self.editing_cell.take() else {
            return;
        };
        let raw = std::mem::take(&mut self.edit_value);
        if position.row_index >= self.rows.len() {
            return;
        }

        let key = self.resolve_key(&position.column_id);
        let custom_type = match &key {
            ColumnKey::CustomField(slug) => match self.column(&position.column_id).map(|c| &c.kind) {
                Some(ColumnKind::CustomField { custom_field_type, .. }) => Some(*custom_field_type),
                _ => self.rows[position.row_index].custom_field_type(slug),
            },
            _ => None,
        };
        let value = parse_input(&raw, &key, custom_type);
        log::trace!("commit {} at row {}", position.column_id, position.row_index);

        self.write_cell(position.row_index, &position.column_id, value);
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.clear_edit();
    }
}
