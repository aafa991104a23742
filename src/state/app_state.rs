//! Application state and transitions.
//!
//! `AppState` is the root state type containing all UI state. The
//! event layer owns one instance; every control-change transition
//! mutates the [`FilterState`] value object and immediately re-runs
//! the pure refresh pipeline, so the visible row set is always
//! consistent with the controls.

use crate::export;
use crate::model::{render_problem_summary, FilterState, SearchColumn};
use crate::table::{self, TableModel};
use std::path::PathBuf;
use tracing::{debug, error};

// ===== InputFocus =====

/// Which control has keyboard focus. Sum type - exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    /// Keys act on the table (modes, toggles, scrolling, export).
    #[default]
    Table,
    /// Keys edit the search query; every edit refreshes immediately.
    Query,
}

// ===== ScrollState =====

/// Vertical scroll state for the table viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    /// Number of visible rows scrolled past at the top.
    pub offset: usize,
}

impl ScrollState {
    /// Scroll up by `amount`, saturating at 0.
    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
    }

    /// Scroll down by `amount`, clamped to `max`.
    pub fn scroll_down(&mut self, amount: usize, max: usize) {
        self.offset = (self.offset + amount).min(max);
    }

    /// Clamp the offset after the visible set shrank.
    pub fn clamp(&mut self, max: usize) {
        self.offset = self.offset.min(max);
    }
}

// ===== AppState =====

/// Root application state.
#[derive(Debug)]
pub struct AppState {
    /// The parsed table; rows plus current visibility and order.
    table: TableModel,
    /// Current control values.
    pub filter: FilterState,
    /// Problem summary computed once at load from the full row set.
    summary: String,
    /// Table viewport scroll.
    pub scroll: ScrollState,
    /// Which control receives keys.
    pub focus: InputFocus,
    /// Help overlay visibility.
    pub help_visible: bool,
    /// One-line status feedback (e.g. last export destination).
    pub status_message: Option<String>,
    /// Where the results file came from; `None` for stdin.
    source_path: Option<PathBuf>,
    /// Where the export action writes.
    export_dir: PathBuf,
}

impl AppState {
    /// Attach to a parsed table with the initial control values.
    ///
    /// Computes the problem summary from the full unfiltered row set
    /// (it reflects total results, not the current filter view) and
    /// performs the initial refresh.
    pub fn new(
        table: TableModel,
        filter: FilterState,
        source_path: Option<PathBuf>,
        export_dir: PathBuf,
    ) -> Self {
        let summary = render_problem_summary(table.rows());
        let mut state = Self {
            table,
            filter,
            summary,
            scroll: ScrollState::default(),
            focus: InputFocus::Table,
            help_visible: false,
            status_message: None,
            source_path,
            export_dir,
        };
        state.refresh();
        state
    }

    /// The table with current visibility and display order.
    pub fn table(&self) -> &TableModel {
        &self.table
    }

    /// The problem summary text computed at load.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Whether the `(COL<i>)` index header row should render.
    ///
    /// Hidden unless the combined-and-tagged search mode is selected.
    pub fn index_header_visible(&self) -> bool {
        self.filter.search_column == SearchColumn::Combined
    }

    /// Re-run the filter pipeline and clamp the scroll position.
    pub fn refresh(&mut self) {
        table::refresh(&mut self.table, &self.filter);
        let max = self.table.visible_count().saturating_sub(1);
        self.scroll.clamp(max);
        debug!(
            visible = self.table.visible_count(),
            total = self.table.rows().len(),
            "refreshed table view"
        );
    }

    // ===== Control-change transitions =====

    /// Step the mode control forward or backward.
    pub fn cycle_mode(&mut self, forward: bool) {
        self.filter.mode = if forward {
            self.filter.mode.next()
        } else {
            self.filter.mode.prev()
        };
        self.refresh();
    }

    /// Toggle the exclude-matches checkbox.
    pub fn toggle_exclude(&mut self) {
        self.filter.include_matches = !self.filter.include_matches;
        self.refresh();
    }

    /// Toggle regex interpretation of the query.
    pub fn toggle_regex(&mut self) {
        self.filter.use_regex = !self.filter.use_regex;
        self.refresh();
    }

    /// Toggle sorting by the time column.
    pub fn toggle_sort_by_time(&mut self) {
        self.filter.sort_by_time = !self.filter.sort_by_time;
        self.refresh();
    }

    /// Step the search-column control forward or backward.
    pub fn cycle_search_column(&mut self, forward: bool) {
        let count = self.table.columns().len();
        self.filter.search_column = if forward {
            self.filter.search_column.next(count)
        } else {
            self.filter.search_column.prev(count)
        };
        self.refresh();
    }

    /// Append one typed character to the query.
    pub fn push_query_char(&mut self, c: char) {
        self.filter.query_text.push(c);
        self.refresh();
    }

    /// Delete the last character of the query (backspace).
    pub fn pop_query_char(&mut self) {
        self.filter.query_text.pop();
        self.refresh();
    }

    /// Clear the whole query.
    pub fn clear_query(&mut self) {
        self.filter.query_text.clear();
        self.refresh();
    }

    /// Append a clicked index header label to the query.
    ///
    /// The label's parentheses are escaped so the tag works as regex
    /// text, and `.*` is inserted when the query is non-empty so
    /// consecutive clicks build a multi-column pattern.
    pub fn append_query_column_tag(&mut self, column: usize) {
        if !self.filter.query_text.is_empty() {
            self.filter.query_text.push_str(".*");
        }
        self.filter.query_text.push_str(&format!(r"\(COL{column}\)"));
        self.refresh();
    }

    // ===== Export =====

    /// Trigger the results-file export.
    ///
    /// Failures are logged and otherwise ignored; success posts the
    /// destination to the status line.
    pub fn export(&mut self) {
        let Some(source) = self.source_path.clone() else {
            error!("export requested but results were read from stdin");
            return;
        };
        match export::export_table_copy(&source, &self.export_dir) {
            Ok(destination) => {
                self.status_message = Some(format!("exported to {}", destination.display()));
            }
            Err(err) => {
                error!(%err, "export failed");
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
