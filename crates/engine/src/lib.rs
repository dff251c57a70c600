//! `variantgrid-engine` — the variant grid editing engine.
//!
//! A [`GridState`] holds the rows, the column schema, the selection and edit
//! buffer, the row clipboard and a bounded undo history. Every change is a
//! [`GridAction`] applied with [`GridState::dispatch`].

pub mod action;
pub mod history;
pub mod ids;
pub mod parse;
pub mod pattern;
pub mod row;
pub mod selectors;
pub mod state;
pub mod value;

mod clipboard;
mod editing;
mod fill;
mod grid_ops;
mod navigation;
mod undo_redo;

#[cfg(test)]
pub mod harness;

pub use action::GridAction;
pub use history::{History, DEFAULT_MAX_ENTRIES};
pub use row::{CustomFieldValue, GridRow, OptionValueRef, RowSeed};
pub use selectors::SavePlan;
pub use state::GridState;
pub use value::CellValue;
