//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | Findings / general error                 |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3-9     | contacts         | Input / config codes                     |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Findings present (duplicate pairs, missing contacts).
/// Like `diff(1)`, exit 1 means "differences exist."
pub const EXIT_FINDINGS: u8 = 1;

/// Usage error - bad arguments, out-of-range options.
pub const EXIT_USAGE: u8 = 2;

/// Input file cannot be read or parsed.
pub const EXIT_PARSE: u8 = 3;

/// Rules config file exists but is invalid.
pub const EXIT_CONFIG: u8 = 4;
