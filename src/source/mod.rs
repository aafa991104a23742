//! Results input sources.
//!
//! The table is static: input is read once at startup, either from a
//! file path or from piped stdin. There is no live tailing; the view
//! is rebuilt from scratch on each run.

use crate::model::InputError;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Raw CSV text plus, for file input, the path it came from.
///
/// The path is kept so the export action can re-read the same file's
/// bytes later; stdin input has no path and cannot be exported.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    /// Full CSV text of the results file.
    pub text: String,
    /// Origin path, `None` for stdin.
    pub path: Option<PathBuf>,
}

/// Read the primary results input.
///
/// With a path, the file is read once; without one, piped stdin is
/// drained to EOF. A terminal stdin with no file is an error rather
/// than a hang.
pub fn read_input(file: Option<PathBuf>) -> Result<LoadedInput, InputError> {
    match file {
        Some(path) => Ok(LoadedInput {
            text: read_existing_file(&path)?,
            path: Some(path),
        }),
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(InputError::NoInput);
            }
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            Ok(LoadedInput { text, path: None })
        }
    }
}

/// Read the optional comparison CSV.
pub fn read_comparison(path: &Path) -> Result<String, InputError> {
    read_existing_file(path)
}

fn read_existing_file(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}
