//! Tracing subscriber initialization.
//!
//! The TUI owns the terminal, so logs go to a file instead of stderr;
//! monitor them with `tail -f` in a second terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Log file path has no filename component.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log file path has no parent directory.
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// The global tracing subscriber was already installed.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize file-based tracing.
///
/// Creates the log directory if needed. Respects `RUST_LOG`, defaults
/// to "info". Fails if a global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // The global subscriber can only be installed once per process, so
    // these tests only assert on the filesystem side effects.

    #[test]
    #[serial(tracing_init)]
    fn init_creates_missing_log_directory() {
        let base = tempfile::tempdir().unwrap();
        let log_dir = base.path().join("logs");
        let log_file = log_dir.join("rtv.log");

        let _ = init(&log_file);

        assert!(log_dir.exists(), "log directory should be created");
    }

    #[test]
    #[serial(tracing_init)]
    fn init_accepts_existing_log_directory() {
        let base = tempfile::tempdir().unwrap();
        let log_file = base.path().join("rtv.log");

        let _ = init(&log_file);

        assert!(base.path().exists());
    }
}
