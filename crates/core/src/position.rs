use serde::{Deserialize, Serialize};

/// A single cell, addressed by row index and column id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    pub row_index: usize,
    pub column_id: String,
}

impl CellPosition {
    pub fn new(row_index: usize, column_id: impl Into<String>) -> Self {
        Self {
            row_index,
            column_id: column_id.into(),
        }
    }

    /// Check whether this position addresses the given cell.
    pub fn is(&self, row_index: usize, column_id: &str) -> bool {
        self.row_index == row_index && self.column_id == column_id
    }
}

/// Two corners of a rectangle. Order-independent: the min/max are taken
/// when the range is consumed, not when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
}

impl CellRange {
    pub fn new(start: CellPosition, end: CellPosition) -> Self {
        Self { start, end }
    }

    /// Inclusive row span, normalized so the first bound is the smaller.
    pub fn row_span(&self) -> (usize, usize) {
        let a = self.start.row_index;
        let b = self.end.row_index;
        (a.min(b), a.max(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_span_is_order_independent() {
        let forward = CellRange::new(CellPosition::new(2, "sku"), CellPosition::new(7, "price"));
        let backward = CellRange::new(CellPosition::new(7, "price"), CellPosition::new(2, "sku"));
        assert_eq!(forward.row_span(), (2, 7));
        assert_eq!(backward.row_span(), (2, 7));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let pos = CellPosition::new(3, "cf_material");
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"rowIndex":3,"columnId":"cf_material"}"#);
    }
}
