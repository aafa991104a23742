//! File export trigger.
//!
//! The TUI counterpart of a "Download CSV" button: on demand, re-read
//! the loaded results file's bytes and drop a copy into the export
//! directory. The copy lands via a staging file that is renamed into
//! place; a detached timer thread releases any leftover staging file
//! after a fixed delay, so cleanup survives the triggering event
//! without blocking it.
//!
//! Failures are logged by the caller and otherwise ignored; the view
//! takes no fallback action.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Delay before the staging resource is released.
pub const RELEASE_DELAY: Duration = Duration::from_secs(1);

/// Errors raised by the export action.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Input came from stdin; there is no file to re-read.
    #[error("results were read from stdin; nothing to export")]
    NoSourcePath,

    /// The results file disappeared or cannot be read.
    #[error("failed to read {path}: {source}")]
    SourceRead {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The copy could not be written into the export directory.
    #[error("failed to write export to {path}: {source}")]
    Write {
        /// Destination that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Copy the results file into the export directory.
///
/// Returns the destination path on success. The source is re-read at
/// trigger time, so the export reflects the file's current bytes.
pub fn export_table_copy(source: &Path, export_dir: &Path) -> Result<PathBuf, ExportError> {
    export_with_delay(source, export_dir, RELEASE_DELAY)
}

fn export_with_delay(
    source: &Path,
    export_dir: &Path,
    release_delay: Duration,
) -> Result<PathBuf, ExportError> {
    let bytes = std::fs::read(source).map_err(|source_err| ExportError::SourceRead {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let file_name = source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("table.csv"));
    let destination = export_dir.join(&file_name);
    let staging = staging_path(&destination);

    let write = || -> std::io::Result<()> {
        std::fs::create_dir_all(export_dir)?;
        std::fs::write(&staging, &bytes)?;
        std::fs::rename(&staging, &destination)
    };
    let result = write().map_err(|source_err| ExportError::Write {
        path: destination.clone(),
        source: source_err,
    });

    // Release the staging file later, whether or not the rename
    // happened; the timer must outlive this call.
    release_later(staging, release_delay);

    result?;
    debug!(path = %destination.display(), "exported results copy");
    Ok(destination)
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

/// Remove `path` after `delay` on a detached thread, ignoring errors.
fn release_later(path: PathBuf, delay: Duration) {
    std::thread::spawn(move || {
        std::thread::sleep(delay);
        let _ = std::fs::remove_file(path);
    });
}

// ===== Tests =====
