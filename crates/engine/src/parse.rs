//! Edit-buffer parsing: raw input string → value for the target column.
//!
//! Numeric parsing is lenient in the same way a spreadsheet text box is:
//! leading whitespace is skipped and the longest leading decimal literal is
//! taken (`"12.5kg"` → `12.5`). Input with no leading number fails.

use once_cell::sync::Lazy;
use regex::Regex;
use variantgrid_core::{ColumnKey, CustomFieldType};

use crate::value::CellValue;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

/// Leading decimal literal of `raw`, or `None` if there is none.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let literal = LEADING_NUMBER.find(trimmed)?.as_str();
    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Field-column numeric rule: never null, never NaN.
pub fn parse_number_or_zero(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

/// `"true"` and `"1"` are true; everything else is false.
pub fn parse_bool(raw: &str) -> bool {
    raw == "true" || raw == "1"
}

/// Parse `raw` per the declared type of the column at `key`.
///
/// `custom_type` is the custom-field type for `cf_` columns, when known.
pub fn parse_input(raw: &str, key: &ColumnKey, custom_type: Option<CustomFieldType>) -> CellValue {
    match key {
        ColumnKey::Field(field) if field.is_numeric_input() => {
            CellValue::Number(parse_number_or_zero(raw))
        }
        ColumnKey::Field(field) if field.is_boolean() => CellValue::Bool(parse_bool(raw)),
        ColumnKey::CustomField(_) => match custom_type {
            Some(CustomFieldType::Number) => parse_number(raw).into(),
            Some(CustomFieldType::Boolean) => CellValue::Bool(parse_bool(raw)),
            _ => CellValue::text(raw),
        },
        _ => CellValue::text(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str) -> ColumnKey {
        ColumnKey::parse(id)
    }

    #[test]
    fn leading_number_rules() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("  -3.25"), Some(-3.25));
        assert_eq!(parse_number("12.5kg"), Some(12.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn out_of_range_literal_is_not_a_number() {
        assert_eq!(parse_number("1e400"), None);
        assert_eq!(parse_input("1e400", &key("price"), None), CellValue::Number(0.0));
        let k = key("cf_weight");
        assert_eq!(parse_input("1e400", &k, Some(CustomFieldType::Number)), CellValue::Null);
    }

    #[test]
    fn numeric_field_columns_default_to_zero() {
        for id in ["price", "compareAtPrice", "costPrice", "stock", "weight", "lowStockThreshold"] {
            assert_eq!(parse_input("oops", &key(id), None), CellValue::Number(0.0), "{id}");
            assert_eq!(parse_input("7", &key(id), None), CellValue::Number(7.0), "{id}");
        }
    }

    #[test]
    fn boolean_field_columns() {
        assert_eq!(parse_input("true", &key("enabled"), None), CellValue::Bool(true));
        assert_eq!(parse_input("1", &key("allowBackorder"), None), CellValue::Bool(true));
        assert_eq!(parse_input("TRUE", &key("enabled"), None), CellValue::Bool(false));
        assert_eq!(parse_input("yes", &key("enabled"), None), CellValue::Bool(false));
    }

    #[test]
    fn custom_number_keeps_unset() {
        let k = key("cf_weight");
        assert_eq!(parse_input("2.5", &k, Some(CustomFieldType::Number)), CellValue::Number(2.5));
        assert_eq!(parse_input("n/a", &k, Some(CustomFieldType::Number)), CellValue::Null);
    }

    #[test]
    fn custom_boolean_and_text() {
        let k = key("cf_flag");
        assert_eq!(parse_input("1", &k, Some(CustomFieldType::Boolean)), CellValue::Bool(true));
        assert_eq!(parse_input("0", &k, Some(CustomFieldType::Boolean)), CellValue::Bool(false));
        assert_eq!(parse_input("007", &k, Some(CustomFieldType::Text)), CellValue::text("007"));
        assert_eq!(parse_input("007", &k, None), CellValue::text("007"));
    }

    #[test]
    fn untyped_columns_pass_through() {
        assert_eq!(parse_input("SKU-001", &key("sku"), None), CellValue::text("SKU-001"));
        assert_eq!(parse_input("M", &key("option_Size"), None), CellValue::text("M"));
        assert_eq!(parse_input("12", &key("length"), None), CellValue::text("12"));
    }
}
