//! Headless replay of a grid edit session.
//!
//! Usage: variantgrid replay script.json [--rows rows.json] [--columns columns.json]
//!
//! A script is either a bare JSON array of actions or an object carrying its
//! own starting data:
//!
//! ```json
//! { "columns": [...], "rows": [...], "actions": [{"type": "UNDO"}] }
//! ```
//!
//! `--rows`/`--columns` override whatever the script embeds. The starting rows
//! are loaded with `SET_ROWS`, so the replay begins clean with empty history.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use variantgrid_config::GridSettings;
use variantgrid_core::GridColumn;
use variantgrid_engine::{GridAction, GridRow, GridState};

use crate::view::{StateView, Summary};
use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Full grid state as JSON
    State,
    /// Rows to create, update and delete, as JSON
    Plan,
    /// Counts, as text
    #[default]
    Summary,
    /// Counts, as JSON
    SummaryJson,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Actions(Vec<GridAction>),
    Session {
        #[serde(default)]
        columns: Option<Vec<GridColumn>>,
        #[serde(default)]
        rows: Option<Vec<GridRow>>,
        actions: Vec<GridAction>,
    },
}

/// Starting data plus the actions to apply.
#[derive(Debug, Default)]
pub struct Script {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
    pub actions: Vec<GridAction>,
}

#[derive(Debug, Default)]
pub struct ReplayOptions {
    pub settings: GridSettings,
    /// Seed for row ids and generated tokens; entropy when absent.
    pub seed: Option<u64>,
    /// Clock for `{DATE}`/`{TIME}` placeholders; wall clock when absent.
    pub now: Option<NaiveDateTime>,
}

pub struct ReplayResult {
    pub state: GridState,
    pub actions: usize,
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, CliError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| CliError::parse(format!("{} {}: {}", what, path.display(), e)))
}

/// Read a script, then apply `--rows`/`--columns` overrides.
pub fn load_script(
    script: &Path,
    rows: Option<&Path>,
    columns: Option<&Path>,
) -> Result<Script, CliError> {
    let mut loaded = match read_json::<ScriptFile>(script, "script")? {
        ScriptFile::Actions(actions) => Script { actions, ..Script::default() },
        ScriptFile::Session { columns, rows, actions } => Script {
            columns: columns.unwrap_or_default(),
            rows: rows.unwrap_or_default(),
            actions,
        },
    };
    if let Some(path) = rows {
        loaded.rows = read_json(path, "rows")?;
    }
    if let Some(path) = columns {
        loaded.columns = read_json(path, "columns")?;
    }
    Ok(loaded)
}

pub fn run(script: Script, options: &ReplayOptions) -> ReplayResult {
    let mut state = match options.seed {
        Some(seed) => GridState::with_seed(&options.settings, seed),
        None => GridState::with_settings(&options.settings),
    };
    state.set_clock(options.now);
    state.dispatch(GridAction::SetColumns { columns: script.columns });
    state.dispatch(GridAction::SetRows { rows: script.rows });

    let actions = script.actions.len();
    for (i, action) in script.actions.into_iter().enumerate() {
        log::debug!("action {}/{}: {}", i + 1, actions, action.name());
        state.dispatch(action);
    }
    log::info!(
        "replayed {} actions; {} rows, {} dirty",
        actions,
        state.row_count(),
        state.dirty_row_count()
    );

    ReplayResult { state, actions }
}

pub fn render(result: &ReplayResult, format: OutputFormat) -> Result<String, CliError> {
    let json = match format {
        OutputFormat::State => serde_json::to_string_pretty(&StateView::new(&result.state)),
        OutputFormat::Plan => serde_json::to_string_pretty(&result.state.save_plan()),
        OutputFormat::SummaryJson => {
            serde_json::to_string_pretty(&Summary::new(&result.state, result.actions))
        }
        OutputFormat::Summary => return Ok(Summary::new(&result.state, result.actions).to_text()),
    };
    json.map(|mut s| {
        s.push('\n');
        s
    })
    .map_err(|e| CliError::internal(format!("cannot serialize output: {}", e)))
}

/// Parse `--now`. Accepts `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_now(raw: &str) -> Result<NaiveDateTime, CliError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| {
            CliError::args(format!("invalid --now {:?}", raw))
                .with_hint("expected e.g. 2024-03-09T14:05:00")
        })
}
