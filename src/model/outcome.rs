//! Outcome classification vocabulary.
//!
//! Rows are classified by a set of outcome tags derived from the test
//! runner's `Status` column and, in comparison mode, from the merge
//! against the comparison file. The problem-summary vocabulary is a
//! declarative table so that new categories are data, not new code
//! paths.

// ===== OutcomeTag =====

/// Classification label carried by a result row.
///
/// A row carries a *set* of tags: a timed-out row whose input hash
/// also changed carries both `Timeout` and `BadHash`. A row with an
/// empty tag set has no problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeTag {
    /// Search result did not match the expected result.
    Fail,
    /// Search was aborted for exceeding the time limit.
    Timeout,
    /// Input hash differs from the comparison file's hash.
    BadHash,
    /// Both runs completed but produced differing results.
    DivergingResult,
    /// The same test case appears more than once in an input file.
    Duplicate,
}

impl OutcomeTag {
    /// All problem tags, in summary priority order.
    pub const ALL: [OutcomeTag; 5] = [
        OutcomeTag::Fail,
        OutcomeTag::DivergingResult,
        OutcomeTag::Timeout,
        OutcomeTag::BadHash,
        OutcomeTag::Duplicate,
    ];
}

// ===== RegressionMarker =====

/// Sub-tag marking a row's problem as newly introduced versus the
/// comparison baseline.
///
/// Only set in comparison mode, when a test's status flipped between
/// the two input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegressionMarker {
    /// Failing now, was not failing before.
    NewFail,
    /// Timing out now, was not timing out before.
    NewTimeout,
}

// ===== ProblemCategory =====

/// One entry of the problem-summary vocabulary.
///
/// Maps an outcome tag to its summary display text and, where the
/// category distinguishes regressions, the marker and secondary text
/// used for the parenthesized sub-count.
#[derive(Debug, Clone, Copy)]
pub struct ProblemCategory {
    /// Tag counted by this category.
    pub tag: OutcomeTag,
    /// Main summary text, preceded by the row count.
    pub main_text: &'static str,
    /// Regression marker counted for the secondary text, if any.
    pub regression: Option<RegressionMarker>,
    /// Secondary summary text, preceded by the regression count.
    pub secondary_text: Option<&'static str>,
}

/// Problem-summary vocabulary, in fixed priority order.
pub const PROBLEM_CATEGORIES: [ProblemCategory; 5] = [
    ProblemCategory {
        tag: OutcomeTag::Fail,
        main_text: "test(s) failed",
        regression: Some(RegressionMarker::NewFail),
        secondary_text: Some("newly failing"),
    },
    ProblemCategory {
        tag: OutcomeTag::DivergingResult,
        main_text: "\"completed\" test(s) with diverging results",
        regression: None,
        secondary_text: None,
    },
    ProblemCategory {
        tag: OutcomeTag::Timeout,
        main_text: "test(s) timed out",
        regression: Some(RegressionMarker::NewTimeout),
        secondary_text: Some("newly timed out"),
    },
    ProblemCategory {
        tag: OutcomeTag::BadHash,
        main_text: "test(s) with non-matching hashes",
        regression: None,
        secondary_text: None,
    },
    ProblemCategory {
        tag: OutcomeTag::Duplicate,
        main_text: "duplicate test(s)",
        regression: None,
        secondary_text: None,
    },
];
