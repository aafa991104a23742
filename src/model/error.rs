//! Input-layer error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while obtaining raw input data.
#[derive(Debug, Error)]
pub enum InputError {
    /// No file argument and stdin is a terminal.
    #[error("No input source: provide a results file path or pipe CSV data on stdin")]
    NoInput,

    /// The given results or comparison file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// I/O failure while reading input.
    #[error("I/O error reading input: {0}")]
    Io(#[from] std::io::Error),
}
