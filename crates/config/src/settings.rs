// Grid settings
// Loaded from ~/.config/variantgrid/grid.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Hard ceiling on `history.limit`
pub const MAX_HISTORY_LIMIT: usize = 50;

/// Undo history bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum undo entries kept (1..=50); the oldest is evicted on overflow
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { limit: MAX_HISTORY_LIMIT }
    }
}

/// Values a freshly added row starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRowSettings {
    pub price: f64,
    pub stock: f64,
    pub low_stock_threshold: f64,
    pub enabled: bool,
    pub allow_backorder: bool,
}

impl Default for NewRowSettings {
    fn default() -> Self {
        Self {
            price: 0.0,
            stock: 0.0,
            low_stock_threshold: 5.0,
            enabled: true,
            allow_backorder: false,
        }
    }
}

/// An explicitly configured generation strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PatternSpec {
    /// Bump the trailing number of the source value
    Increment,
    /// Fresh 8-character `[A-Z0-9]` token
    Uuid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
    },
    /// Placeholder template: `{N}`, `{NUM}`, `{UUID}`, `{DATE}`, `{TIME}`, `{RAND}`
    Template {
        template: String,
        #[serde(default = "default_start_from")]
        start_from: u64,
    },
}

fn default_start_from() -> u64 {
    1
}

/// How fill-down derives barcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeFill {
    /// Increment the source barcode's trailing number by the row offset
    #[default]
    Increment,
    /// Fresh token for every filled row
    Uuid,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillSettings {
    pub barcode: BarcodeFill,
    /// Explicit SKU pattern; `None` = detect from the source value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<PatternSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub history: HistorySettings,
    pub new_row: NewRowSettings,
    pub autofill: AutofillSettings,
}

impl GridSettings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("variantgrid")
            .join("grid.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: GridSettings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_HISTORY_LIMIT).contains(&self.history.limit) {
            return Err(ConfigError::Validation(format!(
                "history.limit must be between 1 and {MAX_HISTORY_LIMIT}, got {}",
                self.history.limit
            )));
        }
        if let Some(PatternSpec::Template { template, .. }) = &self.autofill.sku {
            if template.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "autofill.sku.template must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Read and validate settings from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default grid settings");
                Self::default()
            }
        }
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }
}
