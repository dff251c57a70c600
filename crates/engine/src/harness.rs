//! Fixtures for reducer tests.
//!
//! `loaded_state()` is a seeded grid with three saved rows and a schema that
//! covers every column kind:
//!
//! | idx | sku      | barcode | price | stock | Size | material |
//! |-----|----------|---------|-------|-------|------|----------|
//! | 0   | TEE-001  | 1000    | 10    | 4     | S    | cotton   |
//! | 1   | TEE-002  | 1001    | 12    | 0     | M    |          |
//! | 2   | TEE-003  |         | 14    | 9     |      |          |

use chrono::NaiveDate;
use variantgrid_config::GridSettings;
use variantgrid_core::{CellPosition, CustomFieldType, GridColumn, OptionValueDef};

use crate::action::GridAction;
use crate::row::{CustomFieldValue, GridRow, OptionValueRef};
use crate::state::GridState;
use crate::value::CellValue;

pub const SEED: u64 = 7;

pub fn pos(row: usize, column_id: &str) -> CellPosition {
    CellPosition::new(row, column_id)
}

pub fn columns() -> Vec<GridColumn> {
    vec![
        GridColumn::field("sku"),
        GridColumn::field("barcode"),
        GridColumn::field("price"),
        GridColumn::field("stock"),
        GridColumn::option(
            "Size",
            "opt_size",
            vec![
                OptionValueDef { id: "v_s".into(), value: "S".into() },
                OptionValueDef { id: "v_m".into(), value: "M".into() },
                OptionValueDef { id: "v_l".into(), value: "L".into() },
            ],
        ),
        GridColumn::custom_field("material", "cf_1", CustomFieldType::Text),
    ]
}

fn size(value_id: &str, value: &str) -> OptionValueRef {
    OptionValueRef {
        option_id: "opt_size".into(),
        value_id: value_id.into(),
        value: value.into(),
    }
}

pub fn rows() -> Vec<GridRow> {
    let mut first = GridRow::new("v1").with_sku("TEE-001").with_barcode("1000").with_price(10.0);
    first.stock = 4.0;
    first.option_values.insert("Size".into(), size("v_s", "S"));
    first.custom_fields.insert(
        "material".into(),
        CustomFieldValue {
            field_id: "cf_1".into(),
            field_type: CustomFieldType::Text,
            value: CellValue::text("cotton"),
        },
    );

    let mut second = GridRow::new("v2").with_sku("TEE-002").with_barcode("1001").with_price(12.0);
    second.option_values.insert("Size".into(), size("v_m", "M"));

    let mut third = GridRow::new("v3").with_sku("TEE-003").with_price(14.0);
    third.stock = 9.0;

    vec![first, second, third]
}

pub fn state_with(settings: &GridSettings) -> GridState {
    let mut state = GridState::with_seed(settings, SEED);
    state.set_clock(NaiveDate::from_ymd_opt(2024, 3, 9).and_then(|d| d.and_hms_opt(14, 5, 0)));
    state.dispatch(GridAction::SetColumns { columns: columns() });
    state.dispatch(GridAction::SetRows { rows: rows() });
    state
}

pub fn loaded_state() -> GridState {
    state_with(&GridSettings::default())
}

/// Row skus in display order.
pub fn skus(state: &GridState) -> Vec<Option<String>> {
    state.rows().iter().map(|r| r.sku.clone()).collect()
}
