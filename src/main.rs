//! Results Table Viewer - Entry Point

use clap::Parser;
use rtv::model::{FilterMode, FilterState, SearchColumn};
use std::path::PathBuf;
use tracing::info;

/// Results Table Viewer - TUI for filtering test-result tables
#[derive(Parser, Debug)]
#[command(name = "rtv")]
#[command(version)]
#[command(about = "TUI application for filtering and inspecting test-result tables")]
pub struct Args {
    /// Path to results CSV file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Comparison CSV from an earlier run; adds regression columns
    #[arg(long)]
    pub compare_to: Option<PathBuf>,

    /// Start with this search query
    #[arg(short, long)]
    pub search: Option<String>,

    /// Initial outcome filter mode
    #[arg(long)]
    pub mode: Option<FilterMode>,

    /// Start with exclude-matches enabled
    #[arg(long)]
    pub exclude: bool,

    /// Interpret the search query as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Search column selector: -1 all, -2 combine and tag, >= 0 one column
    #[arg(long, allow_negative_numbers = true, default_value = "-1")]
    pub column: i64,

    /// Start with time sorting enabled
    #[arg(long)]
    pub sort_by_time: bool,

    /// Directory the export action writes into
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    // This ensures consistent color handling throughout the application
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = rtv::config::load_config_with_precedence(args.config.clone())?;
        let merged = rtv::config::merge_config(config_file);
        let with_env = rtv::config::apply_env_overrides(merged);

        // Flags only override when explicitly set.
        let sort_override = if args.sort_by_time { Some(true) } else { None };
        rtv::config::apply_cli_overrides(
            with_env,
            args.mode,
            sort_override,
            args.export_dir.clone(),
        )
    };

    // Initialize tracing with the configured log file path
    rtv::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // Read the initial control values into the filter state.
    let filter = FilterState {
        mode: config.mode,
        query_text: args.search.clone().unwrap_or_default(),
        include_matches: !args.exclude,
        use_regex: args.regex,
        search_column: SearchColumn::from_selector(args.column)?,
        sort_by_time: config.sort_by_time,
    };

    // Load and parse the results (and optional comparison) CSV.
    let input = rtv::source::read_input(args.file.clone())?;
    let comparison = match &args.compare_to {
        Some(path) => Some(rtv::source::read_comparison(path)?),
        None => None,
    };
    let table = rtv::parser::parse_results(&input.text, comparison.as_deref())?;

    info!(
        rows = table.rows().len(),
        columns = table.columns().len(),
        comparison = args.compare_to.is_some(),
        "Results table parsed"
    );

    let state = rtv::state::AppState::new(table, filter, input.path, config.export_dir);
    let color = rtv::view::ColorConfig::from_env_and_args(args.no_color);

    rtv::view::run_with_state(state, color)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["rtv", "--help"]);
        // Help returns Err with DisplayHelp, which is success
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["rtv", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["rtv"]);
        assert_eq!(args.file, None);
        assert_eq!(args.compare_to, None);
        assert_eq!(args.search, None);
        assert_eq!(args.mode, None);
        assert!(!args.exclude);
        assert!(!args.regex);
        assert_eq!(args.column, -1);
        assert!(!args.sort_by_time);
        assert_eq!(args.export_dir, None);
        assert_eq!(args.config, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["rtv", "results.csv"]);
        assert_eq!(args.file, Some(PathBuf::from("results.csv")));
    }

    #[test]
    fn test_compare_to_flag() {
        let args = Args::parse_from(["rtv", "new.csv", "--compare-to", "old.csv"]);
        assert_eq!(args.compare_to, Some(PathBuf::from("old.csv")));
    }

    #[test]
    fn test_search_short_flag() {
        let args = Args::parse_from(["rtv", "-s", "clobber"]);
        assert_eq!(args.search, Some("clobber".to_string()));
    }

    #[test]
    fn test_search_long_flag() {
        let args = Args::parse_from(["rtv", "--search", "timeout"]);
        assert_eq!(args.search, Some("timeout".to_string()));
    }

    #[test]
    fn test_mode_parses_known_names() {
        let args = Args::parse_from(["rtv", "--mode", "no-problem"]);
        assert_eq!(args.mode, Some(FilterMode::NoProblem));
    }

    #[test]
    fn test_mode_rejects_unknown_names() {
        let result = Args::try_parse_from(["rtv", "--mode", "everything"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_accepts_negative_selectors() {
        let args = Args::parse_from(["rtv", "--column", "-2"]);
        assert_eq!(args.column, -2);
        assert_eq!(
            SearchColumn::from_selector(args.column),
            Ok(SearchColumn::Combined)
        );
    }

    #[test]
    fn test_column_accepts_indices() {
        let args = Args::parse_from(["rtv", "--column", "6"]);
        assert_eq!(
            SearchColumn::from_selector(args.column),
            Ok(SearchColumn::Index(6))
        );
    }

    #[test]
    fn test_exclude_and_regex_flags() {
        let args = Args::parse_from(["rtv", "--exclude", "--regex"]);
        assert!(args.exclude);
        assert!(args.regex);
    }

    #[test]
    fn test_sort_by_time_flag() {
        let args = Args::parse_from(["rtv", "--sort-by-time"]);
        assert!(args.sort_by_time);
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["rtv", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["rtv", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "rtv",
            "results.csv",
            "--compare-to",
            "old.csv",
            "-s",
            "clobber",
            "--mode",
            "problem",
            "--regex",
            "--column",
            "-2",
            "--sort-by-time",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("results.csv")));
        assert_eq!(args.compare_to, Some(PathBuf::from("old.csv")));
        assert_eq!(args.search, Some("clobber".to_string()));
        assert_eq!(args.mode, Some(FilterMode::Problem));
        assert!(args.regex);
        assert_eq!(args.column, -2);
        assert!(args.sort_by_time);
    }

    #[test]
    fn test_mode_flows_through_config_precedence_chain() {
        use rtv::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            mode: Some("fail".to_string()),
            sort_by_time: None,
            export_dir: None,
            log_file_path: None,
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(
            merged.mode,
            FilterMode::Fail,
            "Config file should override the default mode"
        );

        let with_cli = apply_cli_overrides(merged, Some(FilterMode::Timeout), None, None);
        assert_eq!(
            with_cli.mode,
            FilterMode::Timeout,
            "CLI mode should override all other sources"
        );
    }
}
