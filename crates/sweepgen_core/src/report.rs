//! Parser for the simulator's tabular text report (`sim.out`).
//!
//! Reports are sections of `|`-separated rows, one column per core:
//!
//! ```text
//!                                    | Core 0     | Core 1
//!   Instructions                     |   1,234,567 |   1,198,001
//! Branch predictor stats
//!   misprediction rate               |      4.50% |      4.12%
//! ```
//!
//! Lines with a space but no `|` name the category for the rows that follow.
//! Parsing is best effort: lines that fit neither shape are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Largest integer an `f64` represents exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single report cell
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(f64),
    Text(String),
}

impl ReportValue {
    /// Interpret a trimmed cell.
    ///
    /// Percentages stay text. Anything else has its thousands separators
    /// removed and is read as a number if it starts with one (`"12.5ns"` reads
    /// as `12.5`); otherwise the original text is kept.
    fn from_cell(cell: &str) -> Self {
        if cell.contains('%') {
            return ReportValue::Text(cell.to_string());
        }
        match parse_number_prefix(&cell.replace(',', "")) {
            Some(n) => ReportValue::Number(n),
            None => ReportValue::Text(cell.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ReportValue::Number(n) => Some(*n),
            ReportValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ReportValue::Number(_) => None,
            ReportValue::Text(s) => Some(s),
        }
    }
}

impl Serialize for ReportValue {
    /// Whole numbers serialize as JSON integers (`1234`, not `1234.0`)
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReportValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            ReportValue::Number(n) => serializer.serialize_f64(*n),
            ReportValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Column label to value, e.g. `"Core 0" -> 0.95`
pub type ColumnValues = IndexMap<String, ReportValue>;

/// Parsed report: metric key to per-column values, in first-seen order.
///
/// Keys are `"<category> - <metric>"` when the row follows a category line,
/// otherwise the bare metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimReport {
    metrics: IndexMap<String, ColumnValues>,
    #[serde(skip)]
    expected_columns: Option<usize>,
}

impl SimReport {
    pub fn parse(text: &str) -> Self {
        let mut report = SimReport::default();
        let mut category = String::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if !line.contains('|') {
                if line.contains(' ') {
                    category = line.to_string();
                }
                continue;
            }

            let mut parts = line.split('|').map(str::trim);
            let metric = parts.next().unwrap_or_default();
            let cells: Vec<ReportValue> = parts.map(ReportValue::from_cell).collect();

            match report.expected_columns {
                None => report.expected_columns = Some(cells.len()),
                Some(expected) if expected != cells.len() => {
                    tracing::debug!(
                        metric,
                        expected,
                        found = cells.len(),
                        "report row column count differs from first row"
                    );
                }
                Some(_) => {}
            }

            let key = if category.is_empty() {
                metric.to_string()
            } else {
                format!("{category} - {metric}")
            };
            if key.is_empty() || key == ":" {
                continue;
            }

            let columns: ColumnValues = cells
                .into_iter()
                .enumerate()
                .filter(|(_, value)| value.as_str() != Some(""))
                .map(|(index, value)| (format!("Core {index}"), value))
                .collect();
            if columns.is_empty() {
                continue;
            }

            // Last write wins; the key keeps its first position
            report.metrics.insert(key, columns);
        }

        report
    }

    pub fn get(&self, key: &str) -> Option<&ColumnValues> {
        self.metrics.get(key)
    }

    /// Look up a single cell, e.g. `value("Core Statistics - IPC", 0)`
    pub fn value(&self, key: &str, column: usize) -> Option<&ReportValue> {
        self.get(key)?.get(&format!("Core {column}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValues)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Column count of the first data row, if any
    pub fn expected_columns(&self) -> Option<usize> {
        self.expected_columns
    }

    pub fn metrics(&self) -> &IndexMap<String, ColumnValues> {
        &self.metrics
    }

    /// Two-space indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Read the longest leading decimal number of `s`.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Returns `None` when `s` does not start with a number
/// or the number overflows.
fn parse_number_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
                                   | Core 0     | Core 1
  Instructions                     |    1,234,567 |   1,198,001
  Cycles                           |    2,000,000 |   2,000,000
Core Statistics
  IPC                              |       0.95 |       1.02
  Time (ns)                        |     751879 |
Branch predictor stats
  num incorrect                    |       1,234.5 |     998
  misprediction rate               |      4.50% |      4.12%
Cache Summary
Cache L1-I
  num cache accesses               |     300000 |     290000
  :                                |          1 |          2
";

    #[test]
    fn test_category_prefixes_key() {
        let report = SimReport::parse(SAMPLE);
        let ipc = report.get("Core Statistics - IPC").unwrap();
        assert_eq!(ipc.get("Core 0"), Some(&ReportValue::Number(0.95)));
        assert_eq!(ipc.get("Core 1"), Some(&ReportValue::Number(1.02)));
    }

    #[test]
    fn test_rows_before_any_category_use_bare_metric() {
        let report = SimReport::parse(SAMPLE);
        assert_eq!(
            report.value("Instructions", 0),
            Some(&ReportValue::Number(1_234_567.0))
        );
        // Header row has an empty metric name and is dropped
        assert!(report.get("").is_none());
    }

    #[test]
    fn test_percent_kept_as_text_and_commas_stripped() {
        let report = SimReport::parse(SAMPLE);
        assert_eq!(
            report.value("Branch predictor stats - misprediction rate", 0),
            Some(&ReportValue::Text("4.50%".to_string()))
        );
        assert_eq!(
            report.value("Branch predictor stats - num incorrect", 0),
            Some(&ReportValue::Number(1234.5))
        );
    }

    #[test]
    fn test_empty_cells_dropped_keep_positions() {
        let report = SimReport::parse("Core Statistics\nTime (ns) |  | 42\n");
        let row = report.get("Core Statistics - Time (ns)").unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("Core 1"), Some(&ReportValue::Number(42.0)));
    }

    #[test]
    fn test_rows_without_values_discarded() {
        let report = SimReport::parse("Core Statistics\nTime (ns) |   |\n");
        assert!(report.is_empty());
    }

    #[test]
    fn test_latest_category_applies() {
        let report = SimReport::parse(SAMPLE);
        assert!(report.get("Cache L1-I - num cache accesses").is_some());
        assert!(report.get("Cache Summary - num cache accesses").is_none());
    }

    #[test]
    fn test_colon_key_discarded() {
        let report = SimReport::parse(": | 1 | 2\n");
        assert!(report.is_empty());
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let report = SimReport::parse("a | 1\nb | 2\na | 3\n");
        let keys: Vec<&str> = report.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(report.value("a", 0), Some(&ReportValue::Number(3.0)));
    }

    #[test]
    fn test_words_without_spaces_are_not_categories() {
        let report = SimReport::parse("Caches\nhits | 10\n");
        assert!(report.get("hits").is_some());
    }

    #[test]
    fn test_non_numeric_cells_kept_as_text() {
        let report = SimReport::parse("| Core 0 | Core 1\nmode | fast | 12.5ns\n");
        assert_eq!(
            report.value("mode", 0),
            Some(&ReportValue::Text("fast".to_string()))
        );
        assert_eq!(report.value("mode", 1), Some(&ReportValue::Number(12.5)));
    }

    #[test]
    fn test_expected_columns_from_first_row() {
        let report = SimReport::parse(SAMPLE);
        assert_eq!(report.expected_columns(), Some(2));
        assert_eq!(SimReport::parse("").expected_columns(), None);
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number_prefix("42"), Some(42.0));
        assert_eq!(parse_number_prefix("-0.5"), Some(-0.5));
        assert_eq!(parse_number_prefix(".5x"), Some(0.5));
        assert_eq!(parse_number_prefix("7."), Some(7.0));
        assert_eq!(parse_number_prefix("1e3ns"), Some(1000.0));
        assert_eq!(parse_number_prefix("2e"), Some(2.0));
        assert_eq!(parse_number_prefix("abc"), None);
        assert_eq!(parse_number_prefix("-"), None);
        assert_eq!(parse_number_prefix("."), None);
        assert_eq!(parse_number_prefix(""), None);
        assert_eq!(parse_number_prefix("1e999"), None);
    }

    #[test]
    fn test_json_rendering() {
        let report = SimReport::parse("Core Statistics\nIPC | 0.95 | 1,200\nrate | 45% |\n");
        let json = report.to_json_pretty().unwrap();
        assert_eq!(
            json,
            r#"{
  "Core Statistics - IPC": {
    "Core 0": 0.95,
    "Core 1": 1200
  },
  "Core Statistics - rate": {
    "Core 0": "45%"
  }
}"#
        );
    }

    #[test]
    fn test_json_deserializes_back() {
        let report = SimReport::parse(SAMPLE);
        let json = report.to_json_pretty().unwrap();
        let back: SimReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics(), report.metrics());
    }
}
