//! Filtering and sorting passes.
//!
//! A refresh runs the passes in a fixed order: the mode filter
//! establishes the visibility baseline, the text filter further
//! restricts it, and the sort pass rebuilds the display order from
//! whatever is still visible. The passes are pure functions over the
//! [`RowView`] capability plus an explicit [`FilterState`]; nothing
//! here touches the terminal.

use crate::model::{FilterMode, FilterState, SearchColumn};
use crate::table::matcher::TextMatcher;
use crate::table::{RowView, TableModel};
use std::cmp::Ordering;
use tracing::warn;

// ===== Mode filter =====

/// Show or hide rows by their outcome tag set.
///
/// - `all`: every row visible.
/// - `problem`: only rows carrying at least one problem tag.
/// - single-outcome modes: only rows carrying that one tag.
/// - `no-problem`: every row except those carrying any problem tag.
pub fn apply_mode_filter<R: RowView>(rows: &mut [R], mode: FilterMode) {
    for row in rows.iter_mut() {
        let visible = match mode {
            FilterMode::All => true,
            FilterMode::Problem => !row.tags().is_empty(),
            FilterMode::NoProblem => row.tags().is_empty(),
            single => match single.single_tag() {
                Some(tag) => row.tags().contains(&tag),
                // Composite modes are handled above.
                None => true,
            },
        };
        row.set_hidden(!visible);
    }
}

// ===== Text filter =====

/// Further hide rows by the free-text query.
///
/// Operates only on rows still visible after the mode pass; rows
/// hidden by mode stay hidden regardless of text match. Final
/// visibility is `hidden_by_mode OR (matched != include_matches)`.
///
/// A specific search column past the table's last column aborts this
/// pass (logged), leaving the mode baseline untouched.
pub fn apply_text_filter<R: RowView>(rows: &mut [R], state: &FilterState, column_count: usize) {
    if let SearchColumn::Index(column) = state.search_column {
        if column >= column_count {
            warn!(
                column,
                column_count, "search column out of range; skipping text filter pass"
            );
            return;
        }
    }

    let matcher = TextMatcher::new(&state.query_text, state.use_regex);

    for row in rows.iter_mut() {
        if row.is_hidden() {
            continue;
        }

        let matched = match state.search_column {
            SearchColumn::All => {
                (0..row.cell_count()).any(|c| match row.cell_text(c) {
                    Some(text) => matcher.is_match(text),
                    None => false,
                })
            }
            SearchColumn::Combined => matcher.is_match(&combined_tagged_text(row)),
            SearchColumn::Index(column) => match row.cell_text(column) {
                Some(text) => matcher.is_match(text),
                None => false,
            },
        };

        if matched != state.include_matches {
            row.set_hidden(true);
        }
    }
}

/// Concatenation of all cells, each prefixed with its `(COL<i>)`
/// positional tag, so one query can constrain several columns.
pub fn combined_tagged_text<R: RowView>(row: &R) -> String {
    let mut text = String::new();
    for column in 0..row.cell_count() {
        text.push_str(&format!("(COL{column})"));
        if let Some(cell) = row.cell_text(column) {
            text.push_str(cell);
        }
    }
    text
}

// ===== Sort =====

/// Rebuild the display order from currently visible rows.
///
/// With `sort_by_time` off (or no time column in the table), visible
/// rows keep their captured original order; hidden rows are skipped,
/// not reinserted. With it on, visible rows sort by the time column's
/// numeric value, descending, with NaN treated as worst: two NaN are
/// equal, NaN sorts after any number, equal numbers are equal. The
/// sort is stable, so ties keep original order.
pub fn apply_sort<R: RowView>(
    rows: &[R],
    time_column: Option<usize>,
    sort_by_time: bool,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).filter(|&i| !rows[i].is_hidden()).collect();

    let Some(time_column) = time_column else {
        return order;
    };
    if !sort_by_time {
        return order;
    }

    order.sort_by(|&a, &b| {
        let ta = row_time(&rows[a], time_column);
        let tb = row_time(&rows[b], time_column);
        descending_nan_last(ta, tb)
    });
    order
}

fn row_time<R: RowView>(row: &R, time_column: usize) -> f64 {
    row.cell_text(time_column)
        .map(parse_leading_float)
        .unwrap_or(f64::NAN)
}

/// Total order: larger times first, NaN after every number.
fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Parse the longest numeric prefix of `text`, NaN when there is none.
///
/// Cells like `"N/A"` or `"???"` from the comparison merge parse as
/// NaN and therefore sort last.
fn parse_leading_float(text: &str) -> f64 {
    let trimmed = text.trim();
    let mut value = f64::NAN;
    for end in 1..=trimmed.len() {
        if !trimmed.is_char_boundary(end) {
            continue;
        }
        if let Ok(parsed) = trimmed[..end].parse::<f64>() {
            value = parsed;
        }
    }
    value
}

// ===== Refresh =====

/// Recompute visibility and display order for every data row.
///
/// Pass order matters: the mode filter establishes the baseline
/// hidden set, the text filter only restricts it further, and the
/// sort pass reorders whatever remains visible.
pub fn refresh(table: &mut TableModel, state: &FilterState) {
    let column_count = table.columns().len();
    apply_mode_filter(table.rows_mut(), state.mode);
    apply_text_filter(table.rows_mut(), state, column_count);
    let order = apply_sort(table.rows(), table.time_column(), state.sort_by_time);
    table.set_display_order(order);
}

// ===== Tests =====

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
