// VariantGrid CLI - headless replay of variant grid edit sessions

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use variantgrid_config::GridSettings;

use variantgrid_cli::exit_codes::{EXIT_DIRTY, EXIT_SUCCESS};
use variantgrid_cli::replay::{self, OutputFormat, ReplayOptions};
use variantgrid_cli::{patterns, CliError};

#[derive(Parser)]
#[command(name = "variantgrid")]
#[command(about = "Replay and inspect variant grid edit sessions")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log engine decisions to stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a JSON action script to a grid and print the result
    #[command(after_help = "\
Examples:
  variantgrid replay session.json
  variantgrid replay actions.json --rows rows.json --columns columns.json -f plan
  variantgrid replay actions.json --rows rows.json --seed 7 --now 2024-03-09T14:05:00 -f state
  variantgrid replay actions.json --rows rows.json --require-clean")]
    Replay {
        /// Action script: a JSON array of actions, or {columns, rows, actions}
        script: PathBuf,

        /// Starting rows (JSON array); overrides rows embedded in the script
        #[arg(long)]
        rows: Option<PathBuf>,

        /// Column schema (JSON array); overrides columns embedded in the script
        #[arg(long)]
        columns: Option<PathBuf>,

        /// Grid settings file (default: the user config directory)
        #[arg(long, env = "VARIANTGRID_SETTINGS")]
        settings: Option<PathBuf>,

        /// Seed row ids and generated tokens for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Fixed clock for {DATE}/{TIME} template placeholders
        #[arg(long, value_name = "DATETIME")]
        now: Option<String>,

        /// What to print
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit 6 if the grid still has unsaved changes after the script
        #[arg(long)]
        require_clean: bool,
    },

    /// Run the SKU/barcode generators directly
    Pattern {
        #[command(subcommand)]
        command: PatternCommands,
    },

    /// Grid settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum PatternCommands {
    /// Next values after VALUE by trailing-number increment
    Increment {
        value: String,
        #[arg(long, short = 'n', default_value_t = 1)]
        count: u64,
    },
    /// Random 8-character tokens
    Uuid {
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long, short = 'n', default_value_t = 1)]
        count: u64,
    },
    /// Expand a template ({N}, {NUM}, {UUID}, {DATE}, {TIME}, {RAND})
    Template {
        template: String,
        #[arg(long, default_value_t = 1)]
        start_from: u64,
        #[arg(long, short = 'n', default_value_t = 1)]
        count: u64,
        #[arg(long, value_name = "DATETIME")]
        now: Option<String>,
    },
    /// Print the strategy auto-fill would pick for VALUE
    Detect { value: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the settings file location
    Path,
    /// Print the effective settings as TOML
    Show {
        #[arg(long, env = "VARIANTGRID_SETTINGS")]
        settings: Option<PathBuf>,
    },
    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  variantgrid-engine ", env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            eprintln!("Usage: variantgrid <command> [options]");
            eprintln!("       variantgrid --help for more information");
            Ok(())
        }
        Some(Commands::Replay {
            script,
            rows,
            columns,
            settings,
            seed,
            now,
            format,
            output,
            require_clean,
        }) => cmd_replay(script, rows, columns, settings, seed, now, format, output, require_clean),
        Some(Commands::Pattern { command }) => cmd_pattern(command),
        Some(Commands::Config { command }) => cmd_config(command),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn resolve_settings(path: Option<PathBuf>) -> Result<GridSettings, CliError> {
    match path {
        Some(path) => Ok(GridSettings::load_from(&path)?),
        None => Ok(GridSettings::load()),
    }
}

fn write_output(text: &str, output: Option<PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(&path, text)
            .map_err(|e| CliError::io(format!("{}: {}", path.display(), e))),
        None => io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .map_err(|e| CliError::io(e.to_string())),
    }
}

fn print_lines(lines: &[String]) -> Result<(), CliError> {
    let mut text = lines.join("\n");
    text.push('\n');
    write_output(&text, None)
}

// ============================================================================
// replay
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn cmd_replay(
    script: PathBuf,
    rows: Option<PathBuf>,
    columns: Option<PathBuf>,
    settings: Option<PathBuf>,
    seed: Option<u64>,
    now: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
    require_clean: bool,
) -> Result<(), CliError> {
    let options = ReplayOptions {
        settings: resolve_settings(settings)?,
        seed,
        now: now.as_deref().map(replay::parse_now).transpose()?,
    };
    let loaded = replay::load_script(&script, rows.as_deref(), columns.as_deref())?;
    let result = replay::run(loaded, &options);

    write_output(&replay::render(&result, format)?, output)?;

    if require_clean && result.state.is_dirty() {
        return Err(CliError {
            code: EXIT_DIRTY,
            message: format!(
                "{} rows have unsaved changes",
                result.state.dirty_row_count()
            ),
            hint: Some("end the script with MARK_SAVED once changes are persisted".to_string()),
        });
    }
    Ok(())
}

// ============================================================================
// pattern
// ============================================================================

fn cmd_pattern(command: PatternCommands) -> Result<(), CliError> {
    match command {
        PatternCommands::Increment { value, count } => {
            print_lines(&patterns::increments(&value, count))
        }
        PatternCommands::Uuid { prefix, count } => {
            print_lines(&patterns::uuids(prefix.as_deref(), count))
        }
        PatternCommands::Template { template, start_from, count, now } => {
            let now = now.as_deref().map(replay::parse_now).transpose()?;
            print_lines(&patterns::templates(&template, start_from, count, now)?)
        }
        PatternCommands::Detect { value } => print_lines(&[patterns::detect(&value).to_string()]),
    }
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            print_lines(&[GridSettings::config_path().display().to_string()])
        }
        ConfigCommands::Show { settings } => {
            let settings = resolve_settings(settings)?;
            let text = toml::to_string_pretty(&settings)
                .map_err(|e| CliError::internal(e.to_string()))?;
            write_output(&text, None)
        }
        ConfigCommands::Init { force } => {
            let path = GridSettings::config_path();
            if path.exists() && !force {
                return Err(CliError::args(format!("{} already exists", path.display()))
                    .with_hint("pass --force to overwrite"));
            }
            GridSettings::default().save_to(&path)?;
            eprintln!("wrote {}", path.display());
            Ok(())
        }
    }
}
