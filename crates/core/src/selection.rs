//! Rectangular selection over the ordered column list.
//!
//! Column ids that are not in the current schema have no position, so a range
//! naming one cannot be resolved. The caller treats that as "no selection
//! change" rather than letting a missing column widen the rectangle.

use crate::column::GridColumn;
use crate::position::{CellPosition, CellRange};

/// A resolved rectangle, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl SelectionBounds {
    /// Resolve a range against the schema, clamped to the grid size.
    ///
    /// Returns `None` if either column id is unknown, or if the rectangle lies
    /// entirely below the last row.
    pub fn resolve(range: &CellRange, columns: &[GridColumn], row_count: usize) -> Option<Self> {
        let a = column_index(columns, &range.start.column_id)?;
        let b = column_index(columns, &range.end.column_id)?;
        let (min_row, max_row) = range.row_span();
        if min_row >= row_count {
            return None;
        }
        Some(Self {
            min_row,
            max_row: max_row.min(row_count - 1),
            min_col: a.min(b),
            max_col: a.max(b),
        })
    }

    pub fn cell_count(&self) -> usize {
        (self.max_row - self.min_row + 1) * (self.max_col - self.min_col + 1)
    }

    /// Iterate over all (row, col) pairs, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (min_row, max_row) = (self.min_row, self.max_row);
        let (min_col, max_col) = (self.min_col, self.max_col);
        (min_row..=max_row).flat_map(move |r| (min_col..=max_col).map(move |c| (r, c)))
    }
}

/// Position of `column_id` in the ordered column list.
pub fn column_index(columns: &[GridColumn], column_id: &str) -> Option<usize> {
    columns.iter().position(|c| c.id == column_id)
}

/// Expand a range into the flat list of selected cells.
pub fn compute_selection(
    range: &CellRange,
    columns: &[GridColumn],
    row_count: usize,
) -> Option<Vec<CellPosition>> {
    let bounds = SelectionBounds::resolve(range, columns, row_count)?;
    let mut cells = Vec::with_capacity(bounds.cell_count());
    for (row, col) in bounds.cells() {
        cells.push(CellPosition::new(row, columns[col].id.clone()));
    }
    Some(cells)
}
