//! Row clipboard: copy, paste, duplicate.
//!
//! Copies always get a fresh id and are new, dirty and not deleted. Barcodes
//! are cleared on every copy since they must stay unique per variant.

use std::collections::HashMap;
use std::sync::Arc;

use crate::pattern::Slot;
use crate::row::GridRow;
use crate::state::GridState;

impl GridState {
    /// Replace the clipboard. Not recorded in history.
    pub(crate) fn copy_rows(&mut self, indices: &[usize]) {
        self.clipboard_rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        log::debug!("copy_rows: {} rows on clipboard", self.clipboard_rows.len());
    }

    /// Insert clipboard copies after `after_index` (appending when it is past
    /// the end). With `generate_unique`, each copy's SKU is derived from its
    /// source at offset 1, plus one for every earlier copy in the same paste
    /// that shares the source SKU, so `A-1, B-1` pastes as `A-2, B-2` and
    /// `A-1, A-1` as `A-2, A-3`.
    pub(crate) fn paste_rows(&mut self, after_index: usize, generate_unique: bool) {
        if self.clipboard_rows.is_empty() {
            return;
        }
        self.record_undo();

        let insert_at = after_index.saturating_add(1).min(self.rows.len());
        let sources = self.clipboard_rows.clone();
        let mut pasted = Vec::with_capacity(sources.len());
        let mut seen: HashMap<Option<String>, u64> = HashMap::new();
        for (i, source) in sources.iter().enumerate() {
            let mut copy = self.fresh_copy(source);
            if generate_unique {
                let offset = seen.entry(source.sku.clone()).or_insert(0);
                *offset += 1;
                let slot = Slot {
                    offset: *offset,
                    row_index: (insert_at + i) as u64,
                };
                self.derive_sku(&mut copy, slot);
            }
            pasted.push(Arc::new(copy));
        }
        self.rows.splice(insert_at..insert_at, pasted);
    }

    /// Append a copy of each listed row with the next SKU in its pattern.
    pub(crate) fn duplicate_rows(&mut self, indices: &[usize]) {
        let sources: Vec<Arc<GridRow>> = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        if sources.is_empty() {
            log::debug!("duplicate_rows: no valid indices in {:?}", indices);
            return;
        }
        self.record_undo();

        for source in sources {
            let mut copy = self.fresh_copy(&source);
            let slot = Slot {
                offset: 1,
                row_index: self.rows.len() as u64,
            };
            self.derive_sku(&mut copy, slot);
            self.rows.push(Arc::new(copy));
        }
    }

    /// Replace a non-empty SKU with the next one from its pattern.
    fn derive_sku(&mut self, row: &mut GridRow, slot: Slot) {
        if let Some(sku) = row.sku.as_deref().filter(|s| !s.is_empty()) {
            let next = self.generate_sku(sku, slot);
            row.sku = Some(next);
        }
    }
}
