//! Filter state value object.
//!
//! One `FilterState` instance is owned by the event layer and passed
//! into the pure filtering functions in [`crate::table`]. There are no
//! module-level globals; control-change events mutate the one instance
//! and trigger a refresh.

use crate::model::outcome::OutcomeTag;
use std::fmt;
use thiserror::Error;

// ===== FilterMode =====

/// Outcome filter mode. Sum type - exactly one mode active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Show every row.
    #[default]
    All,
    /// Show rows carrying any problem tag.
    Problem,
    /// Show only failing rows.
    Fail,
    /// Show only rows with diverging completed results.
    DivergingResult,
    /// Show only timed-out rows.
    Timeout,
    /// Show only rows with non-matching input hashes.
    Hash,
    /// Show only duplicated test rows.
    Duplicate,
    /// Show all rows except those carrying any problem tag.
    NoProblem,
}

impl FilterMode {
    /// All modes, in the order the mode control cycles through them.
    pub const ALL: [FilterMode; 8] = [
        FilterMode::All,
        FilterMode::Problem,
        FilterMode::Fail,
        FilterMode::DivergingResult,
        FilterMode::Timeout,
        FilterMode::Hash,
        FilterMode::Duplicate,
        FilterMode::NoProblem,
    ];

    /// The single tag selected by a single-outcome mode.
    ///
    /// Returns `None` for the composite modes (`All`, `Problem`,
    /// `NoProblem`).
    pub fn single_tag(self) -> Option<OutcomeTag> {
        match self {
            FilterMode::Fail => Some(OutcomeTag::Fail),
            FilterMode::DivergingResult => Some(OutcomeTag::DivergingResult),
            FilterMode::Timeout => Some(OutcomeTag::Timeout),
            FilterMode::Hash => Some(OutcomeTag::BadHash),
            FilterMode::Duplicate => Some(OutcomeTag::Duplicate),
            FilterMode::All | FilterMode::Problem | FilterMode::NoProblem => None,
        }
    }

    /// Next mode in cycle order, wrapping around.
    pub fn next(self) -> FilterMode {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous mode in cycle order, wrapping around.
    pub fn prev(self) -> FilterMode {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterMode::All => "all",
            FilterMode::Problem => "problem",
            FilterMode::Fail => "fail",
            FilterMode::DivergingResult => "diverging-result",
            FilterMode::Timeout => "timeout",
            FilterMode::Hash => "hash",
            FilterMode::Duplicate => "duplicate",
            FilterMode::NoProblem => "no-problem",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterMode::All),
            "problem" => Ok(FilterMode::Problem),
            "fail" => Ok(FilterMode::Fail),
            "diverging-result" => Ok(FilterMode::DivergingResult),
            "timeout" => Ok(FilterMode::Timeout),
            "hash" => Ok(FilterMode::Hash),
            "duplicate" => Ok(FilterMode::Duplicate),
            "no-problem" => Ok(FilterMode::NoProblem),
            other => Err(format!(
                "unknown filter mode {other:?} (expected one of: all, problem, fail, \
                 diverging-result, timeout, hash, duplicate, no-problem)"
            )),
        }
    }
}

// ===== SearchColumn =====

/// Which column(s) the text filter tests. Sum type over the legacy
/// integer selector: `-1` = all columns, `-2` = combined-and-tagged,
/// `>= 0` = one specific column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchColumn {
    /// Test each column independently; any match hits.
    #[default]
    All,
    /// Test the concatenation of all columns, each prefixed with its
    /// `(COL<i>)` positional tag. Selecting this also reveals the
    /// column-index header row.
    Combined,
    /// Test only the column at this index.
    Index(usize),
}

/// Error for out-of-range integer column selectors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid search column selector {0} (expected -2, -1, or a column index >= 0)")]
pub struct InvalidColumnSelector(
    /// The rejected selector value.
    pub i64,
);

impl SearchColumn {
    /// Parse the legacy integer selector.
    pub fn from_selector(value: i64) -> Result<Self, InvalidColumnSelector> {
        match value {
            -1 => Ok(SearchColumn::All),
            -2 => Ok(SearchColumn::Combined),
            n if n >= 0 => Ok(SearchColumn::Index(n as usize)),
            n => Err(InvalidColumnSelector(n)),
        }
    }

    /// The legacy integer selector for this column choice.
    pub fn selector(self) -> i64 {
        match self {
            SearchColumn::All => -1,
            SearchColumn::Combined => -2,
            SearchColumn::Index(n) => n as i64,
        }
    }

    /// Cycle forward through All, each concrete column, Combined.
    pub fn next(self, column_count: usize) -> SearchColumn {
        match self {
            SearchColumn::All if column_count == 0 => SearchColumn::Combined,
            SearchColumn::All => SearchColumn::Index(0),
            SearchColumn::Index(n) if n + 1 < column_count => SearchColumn::Index(n + 1),
            SearchColumn::Index(_) => SearchColumn::Combined,
            SearchColumn::Combined => SearchColumn::All,
        }
    }

    /// Cycle backward through All, each concrete column, Combined.
    pub fn prev(self, column_count: usize) -> SearchColumn {
        match self {
            SearchColumn::All => SearchColumn::Combined,
            SearchColumn::Combined if column_count == 0 => SearchColumn::All,
            SearchColumn::Combined => SearchColumn::Index(column_count - 1),
            SearchColumn::Index(0) => SearchColumn::All,
            SearchColumn::Index(n) => SearchColumn::Index(n - 1),
        }
    }
}

// ===== FilterState =====

/// Transient view-filter state.
///
/// Created at startup from the initial control values, mutated only by
/// control-change events, discarded on exit. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Active outcome filter mode.
    pub mode: FilterMode,
    /// Free-text query; empty matches everything in substring mode.
    pub query_text: String,
    /// `true` keeps matching rows (hide non-matching); `false`
    /// excludes matching rows.
    pub include_matches: bool,
    /// Interpret `query_text` as a regular expression.
    pub use_regex: bool,
    /// Column scope for the text filter.
    pub search_column: SearchColumn,
    /// Sort visible rows by the time column, descending.
    pub sort_by_time: bool,
}

impl FilterState {
    /// State matching the controls' neutral positions: show all rows,
    /// empty substring query, include matches, search all columns, no
    /// time sort.
    pub fn new() -> Self {
        Self {
            mode: FilterMode::All,
            query_text: String::new(),
            include_matches: true,
            use_regex: false,
            search_column: SearchColumn::All,
            sort_by_time: false,
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
