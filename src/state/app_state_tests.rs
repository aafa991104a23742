//! Tests for application state transitions.

use super::*;
use crate::model::{FilterMode, OutcomeTag, TableRow};
use std::path::PathBuf;

fn sample_state() -> AppState {
    let mut fail_row = TableRow::new(vec!["clobber_1xn:XO".into(), "3.0".into(), "FAIL".into()]);
    fail_row.tag(OutcomeTag::Fail);
    let mut timeout_row = TableRow::new(vec!["nim:5 7".into(), "N/A".into(), "TIMEOUT".into()]);
    timeout_row.tag(OutcomeTag::Timeout);
    let pass_row = TableRow::new(vec!["nogo_1xn:..".into(), "1.0".into(), "PASS".into()]);

    let table = TableModel::new(
        vec!["Games".into(), "Time (ms)".into(), "Status".into()],
        vec![fail_row, timeout_row, pass_row],
    );
    AppState::new(table, FilterState::new(), None, PathBuf::from("."))
}

#[test]
fn attach_performs_initial_refresh() {
    let state = sample_state();
    assert_eq!(state.table().display_order(), &[0, 1, 2]);
}

#[test]
fn attach_computes_summary_from_full_row_set() {
    let state = sample_state();
    assert_eq!(
        state.summary(),
        "1 test(s) failed\n1 test(s) timed out\n"
    );
}

#[test]
fn summary_is_not_recomputed_by_filtering() {
    let mut state = sample_state();
    let before = state.summary().to_string();
    state.cycle_mode(true); // all -> problem
    state.push_query_char('z');
    assert_eq!(state.summary(), before);
}

#[test]
fn cycle_mode_refreshes_visibility() {
    let mut state = sample_state();
    state.cycle_mode(true); // all -> problem
    assert_eq!(state.filter.mode, FilterMode::Problem);
    assert_eq!(state.table().display_order(), &[0, 1]);

    state.cycle_mode(false); // back to all
    assert_eq!(state.filter.mode, FilterMode::All);
    assert_eq!(state.table().display_order(), &[0, 1, 2]);
}

#[test]
fn query_edits_refresh_immediately() {
    let mut state = sample_state();
    state.push_query_char('n');
    state.push_query_char('i');
    state.push_query_char('m');
    assert_eq!(state.filter.query_text, "nim");
    assert_eq!(state.table().display_order(), &[1]);

    state.pop_query_char();
    assert_eq!(state.filter.query_text, "ni");
    assert_eq!(state.table().display_order(), &[1]);

    state.clear_query();
    assert_eq!(state.table().display_order(), &[0, 1, 2]);
}

#[test]
fn toggle_exclude_inverts_the_match() {
    let mut state = sample_state();
    state.push_query_char('n');
    state.push_query_char('i');
    state.push_query_char('m');
    state.toggle_exclude();
    assert!(!state.filter.include_matches);
    assert_eq!(state.table().display_order(), &[0, 2]);

    state.toggle_exclude();
    assert_eq!(state.table().display_order(), &[1]);
}

#[test]
fn toggle_sort_orders_and_restores() {
    let mut state = sample_state();
    state.toggle_sort_by_time();
    // Times 3.0, NaN, 1.0 -> 3.0 first, NaN last.
    assert_eq!(state.table().display_order(), &[0, 2, 1]);

    state.toggle_sort_by_time();
    assert_eq!(state.table().display_order(), &[0, 1, 2]);
}

#[test]
fn index_header_follows_combined_column_mode() {
    let mut state = sample_state();
    assert!(!state.index_header_visible());

    // All -> col 0 -> col 1 -> col 2 -> Combined.
    for _ in 0..4 {
        state.cycle_search_column(true);
    }
    assert_eq!(state.filter.search_column, SearchColumn::Combined);
    assert!(state.index_header_visible());

    state.cycle_search_column(true);
    assert!(!state.index_header_visible());
}

#[test]
fn header_click_appends_escaped_tag() {
    let mut state = sample_state();
    state.append_query_column_tag(0);
    assert_eq!(state.filter.query_text, r"\(COL0\)");

    state.append_query_column_tag(2);
    assert_eq!(state.filter.query_text, r"\(COL0\).*\(COL2\)");
}

#[test]
fn header_click_tags_compose_into_a_working_regex() {
    let mut state = sample_state();
    state.filter.use_regex = true;
    state.filter.search_column = SearchColumn::Combined;
    state.append_query_column_tag(0);
    for c in "nim".chars() {
        state.push_query_char(c);
    }
    assert_eq!(state.table().display_order(), &[1]);
}

#[test]
fn scroll_clamps_when_visible_set_shrinks() {
    let mut state = sample_state();
    state.scroll.scroll_down(2, 2);
    assert_eq!(state.scroll.offset, 2);

    // Filtering down to one visible row pulls the offset back.
    for c in "nim".chars() {
        state.push_query_char(c);
    }
    assert_eq!(state.scroll.offset, 0);
}

#[test]
fn export_without_source_path_is_logged_not_fatal() {
    let mut state = sample_state();
    state.export();
    assert!(state.status_message.is_none());
}

#[test]
fn export_with_source_posts_status() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("results.csv");
    std::fs::write(&source, "Games,Status\n").unwrap();

    let table = TableModel::new(vec!["Games".into()], vec![]);
    let mut state = AppState::new(
        table,
        FilterState::new(),
        Some(source),
        dir.path().join("exports"),
    );
    state.export();
    assert!(
        state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("exported to")),
        "status: {:?}",
        state.status_message
    );
}
