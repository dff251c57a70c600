//! Fill-down.
//!
//! Identity columns (sku, barcode) continue the source's pattern so every
//! filled row gets a distinct value; every other column copies the source
//! cell verbatim.

use variantgrid_core::{ColumnKey, VariantField};

use crate::pattern::Slot;
use crate::state::GridState;

impl GridState {
    /// Fill rows `from_index + 1 ..= to_index` from `from_index`. `to_index`
    /// is clamped to the last row; the whole fill is one undo entry.
    pub(crate) fn fill_down(&mut self, column_id: &str, from_index: usize, to_index: usize) {
        if from_index >= self.rows.len() || to_index <= from_index {
            log::debug!("fill_down: empty range {}..={}", from_index, to_index);
            return;
        }
        let to_index = to_index.min(self.rows.len() - 1);
        if to_index == from_index {
            return;
        }

        let key = self.resolve_key(column_id);
        let source = self.rows[from_index].clone();
        // non-empty sku/barcode text continues its pattern
        let pattern_source = source
            .get(&key)
            .as_text()
            .filter(|s| !s.is_empty() && key.is_identity())
            .map(str::to_owned);

        self.record_undo();
        for target in from_index + 1..=to_index {
            let offset = (target - from_index) as u64;
            match pattern_source.as_deref() {
                Some(text) if key == ColumnKey::Field(VariantField::Sku) => {
                    let slot = Slot { offset, row_index: target as u64 };
                    let next = self.generate_sku(text, slot);
                    self.row_mut(target).sku = Some(next);
                }
                Some(text) => {
                    let next = self.generate_barcode(text, offset);
                    self.row_mut(target).barcode = Some(next);
                }
                None => self.row_mut(target).copy_cell_from(&source, &key),
            }
            self.row_mut(target).is_dirty = true;
        }
    }
}
