//! Action types.
//!
//! Every change to a [`GridState`](crate::GridState) is one of these. The UI
//! translates clicks, drags, keys and pastes into actions; scripts serialize
//! them as `{"type": "UPDATE_CELL", ...}`.

use serde::{Deserialize, Serialize};
use variantgrid_core::{CellPosition, CellRange, GridColumn};

use crate::row::{GridRow, RowSeed};
use crate::value::CellValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridAction {
    /// Replace all rows (initial load). Clears history and the dirty flag.
    SetRows { rows: Vec<GridRow> },

    /// Replace the column schema.
    SetColumns { columns: Vec<GridColumn> },

    /// Write an already-typed value into one cell.
    #[serde(rename_all = "camelCase")]
    UpdateCell {
        row_index: usize,
        column_id: String,
        value: CellValue,
    },

    SelectCell { position: CellPosition },

    SelectRange { range: CellRange },

    /// Shift+click: rectangle from the active cell to `position`.
    ExtendSelection { position: CellPosition },

    ClearSelection,

    StartEditing { position: CellPosition },

    SetEditValue { value: String },

    CommitEdit,

    CancelEdit,

    /// Soft delete.
    DeleteRows { indices: Vec<usize> },

    AddRow {
        #[serde(default)]
        seed: Option<RowSeed>,
    },

    DuplicateRows { indices: Vec<usize> },

    CopyRows { indices: Vec<usize> },

    #[serde(rename_all = "camelCase")]
    PasteRows {
        after_index: usize,
        #[serde(default)]
        generate_unique: bool,
    },

    #[serde(rename_all = "camelCase")]
    FillDown {
        column_id: String,
        from_index: usize,
        to_index: usize,
    },

    /// Arrow-key navigation; `extend` grows the selection instead.
    #[serde(rename_all = "camelCase")]
    MoveActive {
        d_row: isize,
        d_col: isize,
        #[serde(default)]
        extend: bool,
    },

    Undo,

    Redo,

    /// The caller's save round-trip succeeded.
    MarkSaved,
}

impl GridAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetRows { .. } => "SET_ROWS",
            Self::SetColumns { .. } => "SET_COLUMNS",
            Self::UpdateCell { .. } => "UPDATE_CELL",
            Self::SelectCell { .. } => "SELECT_CELL",
            Self::SelectRange { .. } => "SELECT_RANGE",
            Self::ExtendSelection { .. } => "EXTEND_SELECTION",
            Self::ClearSelection => "CLEAR_SELECTION",
            Self::StartEditing { .. } => "START_EDITING",
            Self::SetEditValue { .. } => "SET_EDIT_VALUE",
            Self::CommitEdit => "COMMIT_EDIT",
            Self::CancelEdit => "CANCEL_EDIT",
            Self::DeleteRows { .. } => "DELETE_ROWS",
            Self::AddRow { .. } => "ADD_ROW",
            Self::DuplicateRows { .. } => "DUPLICATE_ROWS",
            Self::CopyRows { .. } => "COPY_ROWS",
            Self::PasteRows { .. } => "PASTE_ROWS",
            Self::FillDown { .. } => "FILL_DOWN",
            Self::MoveActive { .. } => "MOVE_ACTIVE",
            Self::Undo => "UNDO",
            Self::Redo => "REDO",
            Self::MarkSaved => "MARK_SAVED",
        }
    }
}
