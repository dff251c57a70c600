//! `variantgrid-core` — shared grid vocabulary.
//!
//! Cell coordinates, the column schema the grid is edited against, and the
//! rectangular selection model. No row data lives here.

pub mod column;
pub mod position;
pub mod selection;

pub use column::{ColumnKey, ColumnKind, CustomFieldType, GridColumn, OptionValueDef, VariantField};
pub use position::{CellPosition, CellRange};
pub use selection::{column_index, compute_selection, SelectionBounds};
