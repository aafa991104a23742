//! Configuration file loading with precedence handling.

use crate::model::FilterMode;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or values.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Config file names an unknown filter mode.
    #[error("Invalid filter mode in {path}: {reason}")]
    InvalidMode {
        /// Path with the invalid mode.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are
/// used. Corresponds to `~/.config/rtv/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initial outcome filter mode (e.g. "all", "problem", "fail").
    #[serde(default)]
    pub mode: Option<String>,

    /// Sort by the time column on startup.
    #[serde(default)]
    pub sort_by_time: Option<bool>,

    /// Directory the export action writes into.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Initial outcome filter mode.
    pub mode: FilterMode,
    /// Sort by the time column on startup.
    pub sort_by_time: bool,
    /// Directory the export action writes into.
    pub export_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            mode: FilterMode::All,
            sort_by_time: false,
            export_dir: default_export_dir(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve the default export directory.
///
/// The platform downloads directory when available, the current
/// directory otherwise.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve the default log file path.
///
/// Returns `~/.local/state/rtv/rtv.log` on Unix-like systems, the
/// platform equivalent elsewhere, or the current directory as a last
/// resort.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rtv").join("rtv.log")
    } else {
        PathBuf::from("rtv.log")
    }
}

/// Resolve the default config file path.
///
/// Returns `~/.config/rtv/config.toml` on Unix, the platform
/// equivalent elsewhere. `None` if no config directory can be found.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rtv").join("config.toml"))
}

/// Load a configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use
/// defaults). Returns `Err` if the file exists but cannot be read or
/// parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    // Validate the mode name eagerly so a typo fails at startup, not
    // at first refresh.
    if let Some(mode) = &config.mode {
        mode.parse::<FilterMode>()
            .map_err(|reason| ConfigError::InvalidMode {
                path: path.clone(),
                reason,
            })?;
    }

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (the CLI `--config` flag)
/// 2. `RTV_CONFIG` environment variable
/// 3. Default path `~/.config/rtv/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("RTV_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a config file into defaults to create a resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise
/// use the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        mode: config
            .mode
            .and_then(|m| m.parse().ok())
            .unwrap_or(defaults.mode),
        sort_by_time: config.sort_by_time.unwrap_or(defaults.sort_by_time),
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to a resolved config.
///
/// Checks for `RTV_EXPORT_DIR`.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var("RTV_EXPORT_DIR") {
        config.export_dir = PathBuf::from(dir);
    }

    config
}

/// Apply CLI argument overrides to a resolved config.
///
/// CLI args have the highest precedence and override all other
/// sources. Only applies overrides for flags the user explicitly set.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    mode_override: Option<FilterMode>,
    sort_override: Option<bool>,
    export_dir_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(mode) = mode_override {
        config.mode = mode;
    }

    if let Some(sort) = sort_override {
        config.sort_by_time = sort;
    }

    if let Some(dir) = export_dir_override {
        config.export_dir = dir;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
