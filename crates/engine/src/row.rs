//! Variant rows and routed cell access.
//!
//! Every generic `(row, column)` read or write goes through [`GridRow::get`]
//! and [`GridRow::write`], which dispatch on the resolved [`ColumnKey`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use variantgrid_config::NewRowSettings;
use variantgrid_core::{ColumnKey, ColumnKind, CustomFieldType, GridColumn, VariantField};

use crate::value::CellValue;

/// The option value a row holds for one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValueRef {
    pub option_id: String,
    pub value_id: String,
    pub value: String,
}

/// The value a row holds for one custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValue {
    pub field_id: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    pub value: CellValue,
}

fn default_true() -> bool {
    true
}

fn default_low_stock() -> f64 {
    5.0
}

/// One product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub id: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_dirty: bool,
    #[serde(default)]
    pub is_deleted: bool,

    pub sku: Option<String>,
    pub barcode: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub stock: f64,
    #[serde(default = "default_low_stock")]
    pub low_stock_threshold: f64,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub allow_backorder: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub image_id: Option<String>,

    #[serde(default)]
    pub option_values: BTreeMap<String, OptionValueRef>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, CustomFieldValue>,
    /// Direct properties outside the standard field set, kept as raw JSON so
    /// arrays and objects survive a load/save cycle.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl GridRow {
    /// A blank row with schema defaults.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_defaults(id, &NewRowSettings::default())
    }

    pub fn with_defaults(id: impl Into<String>, defaults: &NewRowSettings) -> Self {
        Self {
            id: id.into(),
            is_new: false,
            is_dirty: false,
            is_deleted: false,
            sku: None,
            barcode: None,
            price: defaults.price,
            compare_at_price: None,
            cost_price: None,
            stock: defaults.stock,
            low_stock_threshold: defaults.low_stock_threshold,
            weight: None,
            length: None,
            width: None,
            height: None,
            allow_backorder: defaults.allow_backorder,
            enabled: defaults.enabled,
            image_id: None,
            option_values: BTreeMap::new(),
            custom_fields: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Read the value at a routed location.
    pub fn get(&self, key: &ColumnKey) -> CellValue {
        match key {
            ColumnKey::Field(field) => self.get_field(field),
            ColumnKey::Option(name) => self
                .option_values
                .get(name)
                .map(|o| CellValue::text(o.value.clone()))
                .unwrap_or_default(),
            ColumnKey::CustomField(slug) => self
                .custom_fields
                .get(slug)
                .map(|cf| cf.value.clone())
                .unwrap_or_default(),
        }
    }

    pub fn get_field(&self, field: &VariantField) -> CellValue {
        match field {
            VariantField::Sku => self.sku.clone().into(),
            VariantField::Barcode => self.barcode.clone().into(),
            VariantField::Price => self.price.into(),
            VariantField::CompareAtPrice => self.compare_at_price.into(),
            VariantField::CostPrice => self.cost_price.into(),
            VariantField::Stock => self.stock.into(),
            VariantField::LowStockThreshold => self.low_stock_threshold.into(),
            VariantField::Weight => self.weight.into(),
            VariantField::Length => self.length.into(),
            VariantField::Width => self.width.into(),
            VariantField::Height => self.height.into(),
            VariantField::AllowBackorder => self.allow_backorder.into(),
            VariantField::Enabled => self.enabled.into(),
            VariantField::ImageId => self.image_id.clone().into(),
            VariantField::Other(name) => self.extra.get(name).map(CellValue::from).unwrap_or_default(),
        }
    }

    /// Store `value` in a standard field, coerced to the field's type.
    pub fn set_field(&mut self, field: &VariantField, value: CellValue) {
        match field {
            VariantField::Sku => self.sku = value.into_text(),
            VariantField::Barcode => self.barcode = value.into_text(),
            VariantField::ImageId => self.image_id = value.into_text(),
            VariantField::Price => self.price = value.to_number_or_zero(),
            VariantField::Stock => self.stock = value.to_number_or_zero(),
            VariantField::LowStockThreshold => self.low_stock_threshold = value.to_number_or_zero(),
            VariantField::CompareAtPrice => self.compare_at_price = value.to_number(),
            VariantField::CostPrice => self.cost_price = value.to_number(),
            VariantField::Weight => self.weight = value.to_number(),
            VariantField::Length => self.length = value.to_number(),
            VariantField::Width => self.width = value.to_number(),
            VariantField::Height => self.height = value.to_number(),
            VariantField::AllowBackorder => self.allow_backorder = value.to_bool(),
            VariantField::Enabled => self.enabled = value.to_bool(),
            VariantField::Other(name) => {
                self.extra.insert(name.clone(), value.into());
            }
        }
    }

    /// Write `value` at a routed location.
    ///
    /// Option columns look the value up in the column's option list by value
    /// or id; an unmatched value leaves the row's option untouched. Custom
    /// fields take their id and type from the column, or from the entry
    /// already on the row when the column is not in the schema.
    pub fn write(&mut self, key: &ColumnKey, column: Option<&GridColumn>, value: CellValue) {
        match key {
            ColumnKey::Field(field) => self.set_field(field, value),
            ColumnKey::Option(name) => {
                let Some(column) = column else {
                    return;
                };
                let ColumnKind::Option { option_id, .. } = &column.kind else {
                    return;
                };
                let needle = value.to_edit_string();
                if let Some(found) = column.find_option_value(&needle) {
                    self.option_values.insert(
                        name.clone(),
                        OptionValueRef {
                            option_id: option_id.clone(),
                            value_id: found.id.clone(),
                            value: found.value.clone(),
                        },
                    );
                }
            }
            ColumnKey::CustomField(slug) => {
                let meta = match column.map(|c| &c.kind) {
                    Some(ColumnKind::CustomField { custom_field_id, custom_field_type }) => {
                        Some((custom_field_id.clone(), *custom_field_type))
                    }
                    _ => self
                        .custom_fields
                        .get(slug)
                        .map(|cf| (cf.field_id.clone(), cf.field_type)),
                };
                if let Some((field_id, field_type)) = meta {
                    self.custom_fields.insert(
                        slug.clone(),
                        CustomFieldValue { field_id, field_type, value },
                    );
                }
            }
        }
    }

    /// Copy the stored value at `key` from `source` verbatim.
    pub fn copy_cell_from(&mut self, source: &GridRow, key: &ColumnKey) {
        match key {
            ColumnKey::Field(VariantField::Other(name)) => match source.extra.get(name) {
                Some(v) => {
                    self.extra.insert(name.clone(), v.clone());
                }
                None => {
                    self.extra.remove(name);
                }
            },
            ColumnKey::Field(field) => self.set_field(field, source.get_field(field)),
            ColumnKey::Option(name) => match source.option_values.get(name) {
                Some(o) => {
                    self.option_values.insert(name.clone(), o.clone());
                }
                None => {
                    self.option_values.remove(name);
                }
            },
            ColumnKey::CustomField(slug) => match source.custom_fields.get(slug) {
                Some(cf) => {
                    self.custom_fields.insert(slug.clone(), cf.clone());
                }
                None => {
                    self.custom_fields.remove(slug);
                }
            },
        }
    }

    /// Custom-field type known for `slug` on this row, if any.
    pub fn custom_field_type(&self, slug: &str) -> Option<CustomFieldType> {
        self.custom_fields.get(slug).map(|cf| cf.field_type)
    }
}

/// Caller-supplied fields overlaid on a new row's defaults (`ADD_ROW`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowSeed {
    pub id: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub price: Option<f64>,
    pub compare_at_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub stock: Option<f64>,
    pub low_stock_threshold: Option<f64>,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub allow_backorder: Option<bool>,
    pub enabled: Option<bool>,
    pub image_id: Option<String>,
    pub option_values: BTreeMap<String, OptionValueRef>,
    pub custom_fields: BTreeMap<String, CustomFieldValue>,
}

impl RowSeed {
    /// Overlay the supplied fields onto `row`. `id` is handled by the caller.
    pub fn apply_to(self, row: &mut GridRow) {
        row.price = self.price.unwrap_or(row.price);
        row.stock = self.stock.unwrap_or(row.stock);
        row.low_stock_threshold = self.low_stock_threshold.unwrap_or(row.low_stock_threshold);
        row.allow_backorder = self.allow_backorder.unwrap_or(row.allow_backorder);
        row.enabled = self.enabled.unwrap_or(row.enabled);

        row.sku = self.sku.or(row.sku.take());
        row.barcode = self.barcode.or(row.barcode.take());
        row.compare_at_price = self.compare_at_price.or(row.compare_at_price);
        row.cost_price = self.cost_price.or(row.cost_price);
        row.weight = self.weight.or(row.weight);
        row.length = self.length.or(row.length);
        row.width = self.width.or(row.width);
        row.height = self.height.or(row.height);
        row.image_id = self.image_id.or(row.image_id.take());

        row.option_values.extend(self.option_values);
        row.custom_fields.extend(self.custom_fields);
    }
}
