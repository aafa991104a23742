//! Row styling by outcome classification.

use crate::model::{OutcomeTag, TableRow};
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== OutcomeStyles =====

/// Row styles for each outcome category.
///
/// A row showing several problems takes the style of its
/// highest-priority tag (summary priority order).
#[derive(Debug)]
pub struct OutcomeStyles {
    fail: Style,
    diverging: Style,
    timeout: Style,
    bad_hash: Style,
    duplicate: Style,
    header: Style,
    index_header: Style,
}

impl OutcomeStyles {
    /// Styles honoring the color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                fail: Style::default().fg(Color::Red),
                diverging: Style::default().fg(Color::Cyan),
                timeout: Style::default().fg(Color::Yellow),
                bad_hash: Style::default().fg(Color::Magenta),
                duplicate: Style::default().fg(Color::DarkGray),
                header: Style::default().add_modifier(Modifier::BOLD),
                index_header: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                fail: Style::default(),
                diverging: Style::default(),
                timeout: Style::default(),
                bad_hash: Style::default(),
                duplicate: Style::default(),
                header: Style::default().add_modifier(Modifier::BOLD),
                index_header: Style::default(),
            }
        }
    }

    /// Style for a data row, by its highest-priority outcome tag.
    pub fn style_for_row(&self, row: &TableRow) -> Style {
        if row.tags.contains(&OutcomeTag::Fail) {
            self.fail
        } else if row.tags.contains(&OutcomeTag::DivergingResult) {
            self.diverging
        } else if row.tags.contains(&OutcomeTag::Timeout) {
            self.timeout
        } else if row.tags.contains(&OutcomeTag::BadHash) {
            self.bad_hash
        } else if row.tags.contains(&OutcomeTag::Duplicate) {
            self.duplicate
        } else {
            Style::default()
        }
    }

    /// Style for the column-name header line.
    pub fn header(&self) -> Style {
        self.header
    }

    /// Style for the `(COL<i>)` index header line.
    pub fn index_header(&self) -> Style {
        self.index_header
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn row_with(tags: &[OutcomeTag]) -> TableRow {
        let mut row = TableRow::new(vec![]);
        for tag in tags {
            row.tag(*tag);
        }
        row
    }

    #[test]
    #[serial(no_color_env)]
    fn no_color_flag_disables_colors() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn no_color_env_var_disables_colors() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn colors_enabled_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn fail_takes_priority_over_other_tags() {
        std::env::remove_var("NO_COLOR");
        let styles = OutcomeStyles::with_color_config(ColorConfig::from_env_and_args(false));
        let row = row_with(&[OutcomeTag::Timeout, OutcomeTag::Fail, OutcomeTag::BadHash]);
        assert_eq!(styles.style_for_row(&row).fg, Some(Color::Red));
    }

    #[test]
    #[serial(no_color_env)]
    fn untagged_row_has_default_style() {
        std::env::remove_var("NO_COLOR");
        let styles = OutcomeStyles::with_color_config(ColorConfig::from_env_and_args(false));
        let row = row_with(&[]);
        assert_eq!(styles.style_for_row(&row), Style::default());
    }

    #[test]
    #[serial(no_color_env)]
    fn disabled_colors_leave_rows_unstyled() {
        let styles = OutcomeStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let row = row_with(&[OutcomeTag::Fail]);
        assert_eq!(styles.style_for_row(&row).fg, None);
    }
}
