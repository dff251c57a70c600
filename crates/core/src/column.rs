//! Column schema.
//!
//! A column id is resolved exactly once into a [`ColumnKey`] when the column
//! is built, so row access never has to sniff `option_` / `cf_` prefixes.

use serde::{Deserialize, Serialize};

pub const OPTION_PREFIX: &str = "option_";
pub const CUSTOM_FIELD_PREFIX: &str = "cf_";

/// Standard variant properties addressable as `field` columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariantField {
    Sku,
    Barcode,
    Price,
    CompareAtPrice,
    CostPrice,
    Stock,
    LowStockThreshold,
    Weight,
    Length,
    Width,
    Height,
    AllowBackorder,
    Enabled,
    ImageId,
    /// Any other direct property name.
    Other(String),
}

impl VariantField {
    pub fn from_name(name: &str) -> Self {
        match name {
            "sku" => Self::Sku,
            "barcode" => Self::Barcode,
            "price" => Self::Price,
            "compareAtPrice" => Self::CompareAtPrice,
            "costPrice" => Self::CostPrice,
            "stock" => Self::Stock,
            "lowStockThreshold" => Self::LowStockThreshold,
            "weight" => Self::Weight,
            "length" => Self::Length,
            "width" => Self::Width,
            "height" => Self::Height,
            "allowBackorder" => Self::AllowBackorder,
            "enabled" => Self::Enabled,
            "imageId" => Self::ImageId,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Sku => "sku",
            Self::Barcode => "barcode",
            Self::Price => "price",
            Self::CompareAtPrice => "compareAtPrice",
            Self::CostPrice => "costPrice",
            Self::Stock => "stock",
            Self::LowStockThreshold => "lowStockThreshold",
            Self::Weight => "weight",
            Self::Length => "length",
            Self::Width => "width",
            Self::Height => "height",
            Self::AllowBackorder => "allowBackorder",
            Self::Enabled => "enabled",
            Self::ImageId => "imageId",
            Self::Other(name) => name,
        }
    }

    /// Fields whose edit input is parsed as a float, `0` on failure.
    pub fn is_numeric_input(&self) -> bool {
        matches!(
            self,
            Self::Price
                | Self::CompareAtPrice
                | Self::CostPrice
                | Self::Stock
                | Self::Weight
                | Self::LowStockThreshold
        )
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Enabled | Self::AllowBackorder)
    }

    /// `sku` and `barcode` must stay distinct per row.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Sku | Self::Barcode)
    }
}

impl From<String> for VariantField {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<VariantField> for String {
    fn from(field: VariantField) -> Self {
        field.name().to_string()
    }
}

impl std::fmt::Display for VariantField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a column's values live inside a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Field(VariantField),
    /// Option name (the part after `option_`).
    Option(String),
    /// Custom field slug (the part after `cf_`).
    CustomField(String),
}

impl ColumnKey {
    /// Resolve a bare column id using the prefix convention.
    pub fn parse(column_id: &str) -> Self {
        if let Some(name) = column_id.strip_prefix(OPTION_PREFIX) {
            Self::Option(name.to_string())
        } else if let Some(slug) = column_id.strip_prefix(CUSTOM_FIELD_PREFIX) {
            Self::CustomField(slug.to_string())
        } else {
            Self::Field(VariantField::from_name(column_id))
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Field(f) if f.is_identity())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldType {
    Text,
    Number,
    Boolean,
    Select,
    Date,
    Url,
    #[serde(other)]
    Other,
}

/// One value an option column may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValueDef {
    pub id: String,
    pub value: String,
}

/// Column discriminator, flattened into the column object as `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColumnKind {
    Field,
    #[serde(rename_all = "camelCase")]
    Option {
        option_id: String,
        #[serde(default)]
        option_values: Vec<OptionValueDef>,
    },
    #[serde(rename_all = "camelCase")]
    CustomField {
        custom_field_id: String,
        custom_field_type: CustomFieldType,
    },
}

/// One editable dimension of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColumnRepr")]
pub struct GridColumn {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(flatten)]
    pub kind: ColumnKind,
    #[serde(skip_serializing)]
    key: ColumnKey,
}

#[derive(Deserialize)]
struct ColumnRepr {
    id: String,
    #[serde(default)]
    header: Option<String>,
    #[serde(flatten)]
    kind: ColumnKind,
}

impl From<ColumnRepr> for GridColumn {
    fn from(repr: ColumnRepr) -> Self {
        let mut column = Self::new(repr.id, repr.kind);
        column.header = repr.header;
        column
    }
}

impl GridColumn {
    pub fn new(id: impl Into<String>, kind: ColumnKind) -> Self {
        let id = id.into();
        let key = match &kind {
            ColumnKind::Field => ColumnKey::Field(VariantField::from_name(&id)),
            ColumnKind::Option { .. } => {
                ColumnKey::Option(id.strip_prefix(OPTION_PREFIX).unwrap_or(&id).to_string())
            }
            ColumnKind::CustomField { .. } => ColumnKey::CustomField(
                id.strip_prefix(CUSTOM_FIELD_PREFIX).unwrap_or(&id).to_string(),
            ),
        };
        Self {
            id,
            header: None,
            kind,
            key,
        }
    }

    /// A standard field column (`sku`, `price`, ...).
    pub fn field(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Field)
    }

    /// An option column; `name` is the option name without prefix.
    pub fn option(name: &str, option_id: impl Into<String>, values: Vec<OptionValueDef>) -> Self {
        Self::new(
            format!("{OPTION_PREFIX}{name}"),
            ColumnKind::Option {
                option_id: option_id.into(),
                option_values: values,
            },
        )
    }

    /// A custom-field column; `slug` is given without prefix.
    pub fn custom_field(slug: &str, field_id: impl Into<String>, field_type: CustomFieldType) -> Self {
        Self::new(
            format!("{CUSTOM_FIELD_PREFIX}{slug}"),
            ColumnKind::CustomField {
                custom_field_id: field_id.into(),
                custom_field_type: field_type,
            },
        )
    }

    pub fn key(&self) -> &ColumnKey {
        &self.key
    }

    /// Find the option value matching `needle` by value or by id.
    pub fn find_option_value(&self, needle: &str) -> Option<&OptionValueDef> {
        match &self.kind {
            ColumnKind::Option { option_values, .. } => option_values
                .iter()
                .find(|v| v.value == needle || v.id == needle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_routes_by_prefix() {
        assert_eq!(ColumnKey::parse("sku"), ColumnKey::Field(VariantField::Sku));
        assert_eq!(ColumnKey::parse("option_Size"), ColumnKey::Option("Size".into()));
        assert_eq!(ColumnKey::parse("cf_material"), ColumnKey::CustomField("material".into()));
        assert_eq!(
            ColumnKey::parse("supplierCode"),
            ColumnKey::Field(VariantField::Other("supplierCode".into()))
        );
    }

    #[test]
    fn identity_columns() {
        assert!(ColumnKey::parse("sku").is_identity());
        assert!(ColumnKey::parse("barcode").is_identity());
        assert!(!ColumnKey::parse("price").is_identity());
        assert!(!ColumnKey::parse("cf_sku").is_identity());
    }

    #[test]
    fn deserialized_column_resolves_key() {
        let json = r#"{
            "id": "option_Size",
            "header": "Size",
            "type": "option",
            "optionId": "opt_1",
            "optionValues": [{"id": "v_s", "value": "S"}, {"id": "v_m", "value": "M"}]
        }"#;
        let column: GridColumn = serde_json::from_str(json).unwrap();
        assert_eq!(column.key(), &ColumnKey::Option("Size".into()));
        assert_eq!(column.find_option_value("M").map(|v| v.id.as_str()), Some("v_m"));
        assert_eq!(column.find_option_value("v_s").map(|v| v.value.as_str()), Some("S"));
        assert!(column.find_option_value("XL").is_none());
    }

    #[test]
    fn deserialized_custom_field_column() {
        let json = r#"{"id":"cf_weight-class","type":"customField","customFieldId":"f9","customFieldType":"NUMBER"}"#;
        let column: GridColumn = serde_json::from_str(json).unwrap();
        assert_eq!(column.key(), &ColumnKey::CustomField("weight-class".into()));
        assert_eq!(
            column.kind,
            ColumnKind::CustomField {
                custom_field_id: "f9".into(),
                custom_field_type: CustomFieldType::Number,
            }
        );
    }

    #[test]
    fn unknown_custom_field_type_maps_to_other() {
        let ty: CustomFieldType = serde_json::from_str(r#""RICH_TEXT""#).unwrap();
        assert_eq!(ty, CustomFieldType::Other);
    }
}
