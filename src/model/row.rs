//! Result row data.

use crate::model::outcome::{OutcomeTag, RegressionMarker};
use std::collections::BTreeSet;

/// One data row of the results table.
///
/// Rows are created once by the parser before the view attaches; the
/// view layer never creates or destroys rows, it only toggles
/// visibility and reorders. A row's original position is its index in
/// the table's row vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Cell texts, one per table column.
    pub cells: Vec<String>,
    /// Outcome classification tags; empty means no problem.
    pub tags: BTreeSet<OutcomeTag>,
    /// Regression markers from the comparison merge.
    pub markers: BTreeSet<RegressionMarker>,
    /// Current visibility; toggled by the filter engine only.
    pub hidden: bool,
}

impl TableRow {
    /// Row with the given cells, no tags, visible.
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            tags: BTreeSet::new(),
            markers: BTreeSet::new(),
            hidden: false,
        }
    }

    /// Add an outcome tag. Idempotent.
    pub fn tag(&mut self, tag: OutcomeTag) {
        self.tags.insert(tag);
    }

    /// Add a regression marker. Idempotent.
    pub fn mark(&mut self, marker: RegressionMarker) {
        self.markers.insert(marker);
    }

    /// Whether the row carries any problem tag.
    pub fn has_problem(&self) -> bool {
        !self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_row_is_visible_and_untagged() {
        let row = TableRow::new(vec!["a".into(), "b".into()]);
        assert!(!row.hidden);
        assert!(!row.has_problem());
        assert!(row.markers.is_empty());
    }

    #[test]
    fn tagging_is_idempotent() {
        let mut row = TableRow::new(vec![]);
        row.tag(OutcomeTag::Fail);
        row.tag(OutcomeTag::Fail);
        assert_eq!(row.tags.len(), 1);
        assert!(row.has_problem());
    }

    #[test]
    fn rows_accumulate_multiple_tags() {
        let mut row = TableRow::new(vec![]);
        row.tag(OutcomeTag::Timeout);
        row.tag(OutcomeTag::BadHash);
        assert!(row.tags.contains(&OutcomeTag::Timeout));
        assert!(row.tags.contains(&OutcomeTag::BadHash));
    }
}
