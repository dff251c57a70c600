// Configuration loading

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{
    AutofillSettings, BarcodeFill, GridSettings, HistorySettings, NewRowSettings, PatternSpec,
    MAX_HISTORY_LIMIT,
};
