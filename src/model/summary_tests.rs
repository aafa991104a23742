//! Tests for problem summary rendering.

use super::*;
use crate::model::outcome::{OutcomeTag, RegressionMarker};
use crate::model::row::TableRow;

fn tagged_row(tags: &[OutcomeTag], markers: &[RegressionMarker]) -> TableRow {
    let mut row = TableRow::new(vec!["cell".into()]);
    for tag in tags {
        row.tag(*tag);
    }
    for marker in markers {
        row.mark(*marker);
    }
    row
}

#[test]
fn all_clear_emits_fixed_message() {
    let rows = vec![TableRow::new(vec!["ok".into()]), TableRow::new(vec![])];
    assert_eq!(render_problem_summary(&rows), NO_PROBLEMS_MESSAGE);
}

#[test]
fn empty_table_emits_fixed_message() {
    assert_eq!(render_problem_summary(&[]), NO_PROBLEMS_MESSAGE);
}

#[test]
fn two_failures_one_new_regression() {
    let rows = vec![
        tagged_row(&[OutcomeTag::Fail], &[RegressionMarker::NewFail]),
        tagged_row(&[OutcomeTag::Fail], &[]),
    ];
    assert_eq!(
        render_problem_summary(&rows),
        "2 test(s) failed (1 newly failing)\n"
    );
}

#[test]
fn regression_suffix_omitted_when_count_is_zero() {
    let rows = vec![tagged_row(&[OutcomeTag::Fail], &[])];
    assert_eq!(render_problem_summary(&rows), "1 test(s) failed\n");
}

#[test]
fn categories_emit_in_priority_order() {
    let rows = vec![
        tagged_row(&[OutcomeTag::BadHash], &[]),
        tagged_row(&[OutcomeTag::Timeout], &[RegressionMarker::NewTimeout]),
        tagged_row(&[OutcomeTag::DivergingResult], &[]),
        tagged_row(&[OutcomeTag::Fail], &[]),
    ];
    assert_eq!(
        render_problem_summary(&rows),
        "1 test(s) failed\n\
         1 \"completed\" test(s) with diverging results\n\
         1 test(s) timed out (1 newly timed out)\n\
         1 test(s) with non-matching hashes\n"
    );
}

#[test]
fn duplicate_rows_are_summarized_last() {
    let rows = vec![
        tagged_row(&[OutcomeTag::Duplicate], &[]),
        tagged_row(&[OutcomeTag::Fail], &[]),
    ];
    assert_eq!(
        render_problem_summary(&rows),
        "1 test(s) failed\n1 duplicate test(s)\n"
    );
}

#[test]
fn row_with_multiple_tags_counts_in_each_category() {
    let rows = vec![tagged_row(&[OutcomeTag::Timeout, OutcomeTag::BadHash], &[])];
    assert_eq!(
        render_problem_summary(&rows),
        "1 test(s) timed out\n1 test(s) with non-matching hashes\n"
    );
}

#[test]
fn marker_without_matching_tag_does_not_count() {
    // A NewFail marker on a row that is not currently failing (can
    // only happen through hand-built rows) must not produce a
    // regression sub-count.
    let rows = vec![
        tagged_row(&[OutcomeTag::Timeout], &[RegressionMarker::NewFail]),
        tagged_row(&[OutcomeTag::Fail], &[]),
    ];
    assert_eq!(
        render_problem_summary(&rows),
        "1 test(s) failed\n1 test(s) timed out\n"
    );
}

#[test]
fn summary_ignores_hidden_flag() {
    let mut hidden_fail = tagged_row(&[OutcomeTag::Fail], &[]);
    hidden_fail.hidden = true;
    let rows = vec![hidden_fail];
    assert_eq!(render_problem_summary(&rows), "1 test(s) failed\n");
}
