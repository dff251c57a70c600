use serde::{Deserialize, Serialize};

use crate::parse;

/// A dynamically typed cell value, as read from or written to a routed
/// row location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String shown in the edit buffer. Null becomes `""`.
    pub fn to_edit_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }

    /// Numeric reading for non-nullable numeric fields: anything unusable is `0`.
    pub fn to_number_or_zero(&self) -> f64 {
        self.to_number().unwrap_or(0.0)
    }

    /// Numeric reading for nullable numeric fields.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => parse::parse_number(s),
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => parse::parse_bool(s),
        }
    }

    /// Text reading for nullable string fields.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s),
            other => Some(other.to_edit_string()),
        }
    }
}

impl From<CellValue> for serde_json::Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Null => Self::Null,
            CellValue::Bool(b) => Self::Bool(b),
            CellValue::Number(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            CellValue::Text(s) => Self::String(s),
        }
    }
}

/// Arrays and objects read as their compact JSON text.
impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Integral values print without a fractional part (`5`, not `5.0`).
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_string_formats() {
        assert_eq!(CellValue::Null.to_edit_string(), "");
        assert_eq!(CellValue::Number(5.0).to_edit_string(), "5");
        assert_eq!(CellValue::Number(-12.0).to_edit_string(), "-12");
        assert_eq!(CellValue::Number(19.99).to_edit_string(), "19.99");
        assert_eq!(CellValue::Bool(true).to_edit_string(), "true");
        assert_eq!(CellValue::text("SKU-1").to_edit_string(), "SKU-1");
    }

    #[test]
    fn numeric_coercions() {
        assert_eq!(CellValue::text("abc").to_number_or_zero(), 0.0);
        assert_eq!(CellValue::text("abc").to_number(), None);
        assert_eq!(CellValue::text("4.5").to_number(), Some(4.5));
        assert_eq!(CellValue::Number(f64::NAN).to_number_or_zero(), 0.0);
        assert_eq!(CellValue::Null.to_number(), None);
    }

    #[test]
    fn untagged_json_shapes() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[null, true, 3.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Number(3.5),
                CellValue::text("x"),
            ]
        );
    }
}
