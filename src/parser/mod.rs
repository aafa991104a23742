//! Results CSV parser.
//!
//! Converts a test runner's results CSV (and optionally a comparison
//! CSV from an earlier run) into a [`TableModel`]: output columns,
//! per-row outcome tags, and regression markers.
//!
//! In comparison mode, rows are matched by the `(Games, Player,
//! Expected Result)` key. Comparison rows sharing a key are consumed
//! in file order; repeated keys in the primary file mark the later
//! rows as duplicates instead of silently overwriting the earlier
//! ones.

use crate::model::{OutcomeTag, RegressionMarker, TableRow};
use crate::table::TableModel;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;
use tracing::warn;

// Status string constants
const STATUS_PASS: &str = "PASS";
const STATUS_FAIL: &str = "FAIL";
const STATUS_COMPLETED: &str = "COMPLETED";
const STATUS_TIMEOUT: &str = "TIMEOUT";

/// Placeholder for comparison-derived cells without a partner row.
const NOT_AVAILABLE: &str = "N/A";

/// Input column headers, in the exact order the runner writes them.
pub const INPUT_COLUMNS: [&str; 10] = [
    "File",
    "Case",
    "Games",
    "Player",
    "Expected Result",
    "Result",
    "Time (ms)",
    "Status",
    "Comments",
    "Input hash",
];

// Input column indices, kept in sync with INPUT_COLUMNS.
const COL_FILE: usize = 0;
const COL_CASE: usize = 1;
const COL_GAMES: usize = 2;
const COL_PLAYER: usize = 3;
const COL_EXPECTED: usize = 4;
const COL_RESULT: usize = 5;
const COL_TIME: usize = 6;
const COL_STATUS: usize = 7;
const COL_COMMENTS: usize = 8;
const COL_HASH: usize = 9;

/// Times are highlighted as changed when they differ by at least this
/// many milliseconds...
const TIME_THRESHOLD_ABS_MS: f64 = 5.0;
/// ...and by at least this fraction of the smaller time.
const TIME_THRESHOLD_FRAC: f64 = 0.1;

// ===== Errors =====

/// Errors raised while parsing results CSV data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Underlying CSV decode failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row does not match the expected runner schema.
    #[error("unexpected columns: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// Headers the runner is expected to write.
        expected: Vec<String>,
        /// Headers actually found in the file.
        found: Vec<String>,
    },
}

// ===== Raw records =====

/// One input row in runner schema order.
#[derive(Debug, Clone)]
struct RawRecord {
    fields: Vec<String>,
}

impl RawRecord {
    fn get(&self, column: usize) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// Key used to match rows between the primary and comparison files.
    fn key(&self) -> (String, String, String) {
        (
            self.get(COL_GAMES).to_string(),
            self.get(COL_PLAYER).to_string(),
            self.get(COL_EXPECTED).to_string(),
        )
    }
}

fn read_records(input: &str) -> Result<Vec<RawRecord>, ParseError> {
    let mut reader = csv::Reader::from_reader(input.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers != INPUT_COLUMNS {
        return Err(ParseError::SchemaMismatch {
            expected: INPUT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: headers,
        });
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(RawRecord {
            fields: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(records)
}

// ===== Parsing =====

/// Parse a results CSV, optionally merged against a comparison CSV.
///
/// Without a comparison file the table carries the input columns minus
/// the hash column; outcome tags come from `Status` alone. With one,
/// the comparison-derived columns (time improvement, old time/status/
/// result, regression, hash check) are appended and rows gain
/// comparison-derived tags and regression markers.
pub fn parse_results(input: &str, comparison: Option<&str>) -> Result<TableModel, ParseError> {
    let records = read_records(input)?;

    match comparison {
        None => Ok(build_single_table(records)),
        Some(comparison) => {
            let comparison_records = read_records(comparison)?;
            Ok(build_comparison_table(records, comparison_records))
        }
    }
}

/// Single mode output: input columns without the hash column.
fn single_mode_columns() -> Vec<String> {
    INPUT_COLUMNS[..COL_HASH].iter().map(|c| c.to_string()).collect()
}

/// Comparison mode output: input columns interleaved with the derived
/// comparison columns, hash last.
fn comparison_mode_columns() -> Vec<String> {
    [
        "File",
        "Case",
        "Games",
        "Player",
        "Expected Result",
        "Result",
        "Time (ms)",
        "Time Improvement",
        "Old Time (ms)",
        "Status",
        "Regression",
        "Old Status",
        "Old Result",
        "Comments",
        "Input hash",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn build_single_table(records: Vec<RawRecord>) -> TableModel {
    let mut duplicates = DuplicateTracker::new("primary input file");
    let mut rows = Vec::with_capacity(records.len());

    for record in &records {
        let mut row = TableRow::new(
            (0..COL_HASH).map(|c| record.get(c).to_string()).collect(),
        );
        tag_status(&mut row, record.get(COL_STATUS));
        if duplicates.check(record) {
            row.tag(OutcomeTag::Duplicate);
        }
        rows.push(row);
    }

    TableModel::new(single_mode_columns(), rows)
}

fn build_comparison_table(records: Vec<RawRecord>, comparison: Vec<RawRecord>) -> TableModel {
    // Bucket comparison rows by key, consumed front-first so repeated
    // tests pair up in file order.
    let mut comparison_by_key: HashMap<(String, String, String), VecDeque<RawRecord>> =
        HashMap::new();
    let mut comparison_duplicates = DuplicateTracker::new("comparison file");
    for record in comparison {
        comparison_duplicates.check(&record);
        comparison_by_key.entry(record.key()).or_default().push_back(record);
    }

    let mut duplicates = DuplicateTracker::new("primary input file");
    let mut rows = Vec::with_capacity(records.len());

    for record in &records {
        let partner = comparison_by_key
            .get_mut(&record.key())
            .and_then(VecDeque::pop_front);
        let mut row = comparison_row(record, partner.as_ref());
        if duplicates.check(record) {
            row.tag(OutcomeTag::Duplicate);
        }
        rows.push(row);
    }

    TableModel::new(comparison_mode_columns(), rows)
}

/// Build one output row in comparison mode.
fn comparison_row(record: &RawRecord, partner: Option<&RawRecord>) -> TableRow {
    let mut hash_text = record.get(COL_HASH).to_string();
    let mut bad_hash = false;
    if let Some(partner) = partner {
        if record.get(COL_HASH) != partner.get(COL_HASH) {
            hash_text.push_str(" BAD HASH");
            bad_hash = true;
        }
    }

    let faster = match partner {
        None => NOT_AVAILABLE.to_string(),
        Some(partner) => time_improvement(record.get(COL_TIME), partner.get(COL_TIME)).0,
    };

    let (regression, diverging) = match partner {
        None => (NOT_AVAILABLE.to_string(), false),
        Some(partner) => regression_text(record, partner),
    };

    let old = |column: usize| {
        partner
            .map(|p| p.get(column).to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    let cells = vec![
        record.get(COL_FILE).to_string(),
        record.get(COL_CASE).to_string(),
        record.get(COL_GAMES).to_string(),
        record.get(COL_PLAYER).to_string(),
        record.get(COL_EXPECTED).to_string(),
        record.get(COL_RESULT).to_string(),
        record.get(COL_TIME).to_string(),
        faster,
        old(COL_TIME),
        record.get(COL_STATUS).to_string(),
        regression,
        old(COL_STATUS),
        old(COL_RESULT),
        record.get(COL_COMMENTS).to_string(),
        hash_text,
    ];

    let mut row = TableRow::new(cells);
    tag_status(&mut row, record.get(COL_STATUS));
    if bad_hash {
        row.tag(OutcomeTag::BadHash);
    }
    if diverging {
        row.tag(OutcomeTag::DivergingResult);
    }
    if let Some(partner) = partner {
        if record.get(COL_STATUS) != partner.get(COL_STATUS) {
            match record.get(COL_STATUS) {
                STATUS_FAIL => row.mark(RegressionMarker::NewFail),
                STATUS_TIMEOUT => row.mark(RegressionMarker::NewTimeout),
                _ => {}
            }
        }
    }

    row
}

/// Outcome tags derived from the `Status` column alone.
fn tag_status(row: &mut TableRow, status: &str) {
    match status {
        STATUS_FAIL => row.tag(OutcomeTag::Fail),
        STATUS_TIMEOUT => row.tag(OutcomeTag::Timeout),
        STATUS_PASS | STATUS_COMPLETED => {}
        other => {
            if !other.is_empty() {
                warn!(status = other, "unknown status value; row left untagged");
            }
        }
    }
}

/// `Regression` cell text plus whether the row has diverging results.
fn regression_text(record: &RawRecord, partner: &RawRecord) -> (String, bool) {
    let status = record.get(COL_STATUS);
    let old_status = partner.get(COL_STATUS);

    if status == old_status {
        if status == STATUS_COMPLETED && record.get(COL_RESULT) != partner.get(COL_RESULT) {
            return ("NEW DIVERGING RESULT".to_string(), true);
        }
        return (format!("STILL {status}"), false);
    }

    (format!("NEW {status}"), false)
}

/// `Time Improvement` cell text and whether it crosses the highlight
/// thresholds (ratio and absolute difference).
fn time_improvement(new_time: &str, old_time: &str) -> (String, bool) {
    // A timed-out run has no meaningful duration to compare.
    if new_time == STATUS_TIMEOUT || old_time == STATUS_TIMEOUT {
        return ("???".to_string(), false);
    }
    let (Ok(new_ms), Ok(old_ms)) = (new_time.trim().parse::<f64>(), old_time.trim().parse::<f64>())
    else {
        return ("???".to_string(), false);
    };

    let new_ms = new_ms.max(0.0001);
    let old_ms = old_ms.max(0.0001);
    let frac = new_ms.max(old_ms) / new_ms.min(old_ms);

    let direction = if new_ms < old_ms { "AS FAST" } else { "AS SLOW" };
    let text = format!("{frac:.2}x {direction}");

    let diff = new_ms - old_ms;
    let significant = frac >= 1.0 + TIME_THRESHOLD_FRAC && diff.abs() >= TIME_THRESHOLD_ABS_MS;
    (text, significant)
}

// ===== DuplicateTracker =====

/// Tracks repeated row keys within one input file.
struct DuplicateTracker {
    label: &'static str,
    seen: HashSet<(String, String, String)>,
    warned: bool,
}

impl DuplicateTracker {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            seen: HashSet::new(),
            warned: false,
        }
    }

    /// Returns true when `record`'s key was already seen.
    fn check(&mut self, record: &RawRecord) -> bool {
        let duplicate = !self.seen.insert(record.key());
        if duplicate && !self.warned {
            warn!(file = self.label, "input contains duplicate tests");
            self.warned = true;
        }
        duplicate
    }
}

// ===== Tests =====
