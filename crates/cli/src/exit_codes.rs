//! CLI Exit Code Registry
//!
//! Single source of truth for the `variantgrid` exit codes. Scripts rely on
//! them, so existing values never change meaning.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad arguments)                    |
//! | 3    | I/O error (missing or unwritable file)         |
//! | 4    | Input parse error (rows, columns, script JSON) |
//! | 5    | Settings error (invalid grid.toml)             |
//! | 6    | Replay finished with unsaved changes (`--require-clean`) |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, conflicting options.
pub const EXIT_USAGE: u8 = 2;

/// A file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Rows, columns or action script are not valid JSON for their shape.
pub const EXIT_PARSE: u8 = 4;

/// Settings file failed to parse or validate.
pub const EXIT_CONFIG: u8 = 5;

/// `--require-clean` was given and the grid is still dirty after the script.
pub const EXIT_DIRTY: u8 = 6;
