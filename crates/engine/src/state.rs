//! The grid state container.
//!
//! All mutation goes through [`GridState::dispatch`]. Each action is applied
//! synchronously and completely: batch operations (duplicate, paste, fill)
//! produce one state transition and at most one undo entry. Actions that
//! cannot apply (empty stacks, out-of-range rows, no active cell) leave the
//! state untouched.
//!
//! The operations themselves live next to this file, grouped the way the UI
//! groups them: `navigation`, `editing`, `grid_ops`, `clipboard`, `fill`,
//! `undo_redo`, `selectors`.

use std::sync::Arc;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use variantgrid_config::{AutofillSettings, GridSettings, NewRowSettings};
use variantgrid_core::{CellPosition, ColumnKey, GridColumn};

use crate::action::GridAction;
use crate::history::History;
use crate::ids::RowIdGenerator;
use crate::pattern::{self, Slot};
use crate::row::GridRow;
use crate::value::CellValue;

#[derive(Debug, Clone)]
pub struct GridState {
    pub(crate) rows: Vec<Arc<GridRow>>,
    pub(crate) columns: Vec<GridColumn>,

    pub(crate) selected_cells: Vec<CellPosition>,
    pub(crate) active_cell: Option<CellPosition>,
    /// Moving corner of a keyboard/shift selection; the active cell is the anchor.
    pub(crate) extent: Option<CellPosition>,
    pub(crate) editing_cell: Option<CellPosition>,
    pub(crate) edit_value: String,

    pub(crate) clipboard_rows: Vec<Arc<GridRow>>,
    pub(crate) is_dirty: bool,
    pub(crate) history: History,

    pub(crate) ids: RowIdGenerator,
    pub(crate) rng: StdRng,
    pub(crate) fixed_now: Option<NaiveDateTime>,
    pub(crate) autofill: AutofillSettings,
    pub(crate) new_row: NewRowSettings,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}

impl GridState {
    pub fn new() -> Self {
        Self::with_settings(&GridSettings::default())
    }

    pub fn with_settings(settings: &GridSettings) -> Self {
        Self::build(settings, StdRng::from_entropy())
    }

    /// Deterministic ids and tokens, for replays and tests.
    pub fn with_seed(settings: &GridSettings, seed: u64) -> Self {
        Self::build(settings, StdRng::seed_from_u64(seed))
    }

    fn build(settings: &GridSettings, mut rng: StdRng) -> Self {
        let ids = RowIdGenerator::new(&mut rng);
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            selected_cells: Vec::new(),
            active_cell: None,
            extent: None,
            editing_cell: None,
            edit_value: String::new(),
            clipboard_rows: Vec::new(),
            is_dirty: false,
            history: History::with_limit(settings.history.limit),
            ids,
            rng,
            fixed_now: None,
            autofill: settings.autofill.clone(),
            new_row: settings.new_row.clone(),
        }
    }

    /// Pin the clock used for `{DATE}`/`{TIME}` template placeholders.
    pub fn set_clock(&mut self, now: Option<NaiveDateTime>) {
        self.fixed_now = now;
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: GridAction) {
        log::trace!("dispatch {}", action.name());
        match action {
            GridAction::SetRows { rows } => self.set_rows(rows),
            GridAction::SetColumns { columns } => self.set_columns(columns),
            GridAction::UpdateCell { row_index, column_id, value } => {
                self.update_cell(row_index, &column_id, value)
            }
            GridAction::SelectCell { position } => self.select_cell(position),
            GridAction::SelectRange { range } => self.select_range(range),
            GridAction::ExtendSelection { position } => self.extend_selection(position),
            GridAction::ClearSelection => self.clear_selection(),
            GridAction::StartEditing { position } => self.start_editing(position),
            GridAction::SetEditValue { value } => self.set_edit_value(value),
            GridAction::CommitEdit => self.commit_edit(),
            GridAction::CancelEdit => self.cancel_edit(),
            GridAction::DeleteRows { indices } => self.delete_rows(&indices),
            GridAction::AddRow { seed } => self.add_row(seed),
            GridAction::DuplicateRows { indices } => self.duplicate_rows(&indices),
            GridAction::CopyRows { indices } => self.copy_rows(&indices),
            GridAction::PasteRows { after_index, generate_unique } => {
                self.paste_rows(after_index, generate_unique)
            }
            GridAction::FillDown { column_id, from_index, to_index } => {
                self.fill_down(&column_id, from_index, to_index)
            }
            GridAction::MoveActive { d_row, d_col, extend } => self.move_active(d_row, d_col, extend),
            GridAction::Undo => self.undo(),
            GridAction::Redo => self.redo(),
            GridAction::MarkSaved => self.mark_saved(),
        }
    }

    /// Reducer form: `(state, action) → state'`.
    pub fn reduce(mut self, action: GridAction) -> Self {
        self.dispatch(action);
        self
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn rows(&self) -> &[Arc<GridRow>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&GridRow> {
        self.rows.get(index).map(|r| r.as_ref())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&GridColumn> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn selected_cells(&self) -> &[CellPosition] {
        &self.selected_cells
    }

    pub fn active_cell(&self) -> Option<&CellPosition> {
        self.active_cell.as_ref()
    }

    pub fn editing_cell(&self) -> Option<&CellPosition> {
        self.editing_cell.as_ref()
    }

    pub fn edit_value(&self) -> &str {
        &self.edit_value
    }

    pub fn clipboard_rows(&self) -> &[Arc<GridRow>] {
        &self.clipboard_rows
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn autofill(&self) -> &AutofillSettings {
        &self.autofill
    }

    /// Value at a cell, routed through the column key.
    pub fn cell_value(&self, row_index: usize, column_id: &str) -> CellValue {
        match self.rows.get(row_index) {
            Some(row) => row.get(&self.resolve_key(column_id)),
            None => CellValue::Null,
        }
    }

    // ------------------------------------------------------------------
    // Shared helpers
    // ------------------------------------------------------------------

    /// Schema key for `column_id`, or the prefix-derived key when the column
    /// is not in the schema.
    pub(crate) fn resolve_key(&self, column_id: &str) -> ColumnKey {
        self.column(column_id)
            .map(|c| c.key().clone())
            .unwrap_or_else(|| ColumnKey::parse(column_id))
    }

    /// Snapshot the rows onto the undo stack and mark the grid dirty.
    pub(crate) fn record_undo(&mut self) {
        self.history.record(self.rows.clone());
        self.is_dirty = true;
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> &mut GridRow {
        Arc::make_mut(&mut self.rows[index])
    }

    /// Record, write one routed cell, and mark its row dirty.
    pub(crate) fn write_cell(&mut self, row_index: usize, column_id: &str, value: CellValue) {
        self.record_undo();
        let key = self.resolve_key(column_id);
        let column = self.columns.iter().find(|c| c.id == column_id);
        let row = Arc::make_mut(&mut self.rows[row_index]);
        row.write(&key, column, value);
        row.is_dirty = true;
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        self.fixed_now
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    pub(crate) fn generate_sku(&mut self, source: &str, slot: Slot) -> String {
        let now = self.now();
        pattern::next_sku(source, slot, self.autofill.sku.as_ref(), now, &mut self.rng)
    }

    pub(crate) fn generate_barcode(&mut self, source: &str, offset: u64) -> String {
        pattern::next_barcode(source, offset, self.autofill.barcode, &mut self.rng)
    }

    /// A new, dirty copy of `source` under a fresh id. Barcodes are never
    /// carried over.
    pub(crate) fn fresh_copy(&mut self, source: &GridRow) -> GridRow {
        let mut copy = source.clone();
        copy.id = self.ids.next_id();
        copy.is_new = true;
        copy.is_dirty = true;
        copy.is_deleted = false;
        copy.barcode = None;
        copy
    }

    pub(crate) fn clear_edit(&mut self) {
        self.editing_cell = None;
        self.edit_value.clear();
    }

    /// Drop selection state that points past the last row.
    pub(crate) fn prune_selection(&mut self) {
        let len = self.rows.len();
        self.selected_cells.retain(|c| c.row_index < len);
        if self.active_cell.as_ref().is_some_and(|c| c.row_index >= len) {
            self.active_cell = None;
        }
        if self.extent.as_ref().is_some_and(|c| c.row_index >= len) {
            self.extent = None;
        }
        if self.editing_cell.as_ref().is_some_and(|c| c.row_index >= len) {
            self.clear_edit();
        }
    }
}
