//! Problem summary rendering.
//!
//! The summary is recomputed from the full unfiltered row set at load
//! time and reflects total results, not the current filter view.

use crate::model::outcome::PROBLEM_CATEGORIES;
use crate::model::row::TableRow;

/// Message emitted when no category has any rows.
pub const NO_PROBLEMS_MESSAGE: &str = "No problems found. All tests passed!";

/// Render the one-line-per-category problem summary.
///
/// For each category in priority order with a nonzero row count, emits
/// `"<count> <main text>"`, followed by `" (<n> <secondary text>)"`
/// when the category tracks regressions and any tagged row also
/// carries the regression marker. Each category line is terminated by
/// a newline. With zero rows in every category the result is exactly
/// [`NO_PROBLEMS_MESSAGE`].
pub fn render_problem_summary(rows: &[TableRow]) -> String {
    let mut summary = String::new();

    for category in PROBLEM_CATEGORIES {
        let tagged: Vec<&TableRow> = rows.iter().filter(|r| r.tags.contains(&category.tag)).collect();
        if tagged.is_empty() {
            continue;
        }

        summary.push_str(&format!("{} {}", tagged.len(), category.main_text));

        if let (Some(marker), Some(secondary)) = (category.regression, category.secondary_text) {
            let regressions = tagged.iter().filter(|r| r.markers.contains(&marker)).count();
            if regressions > 0 {
                summary.push_str(&format!(" ({regressions} {secondary})"));
            }
        }

        summary.push('\n');
    }

    if summary.is_empty() {
        summary.push_str(NO_PROBLEMS_MESSAGE);
    }

    summary
}

// ===== Tests =====

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
