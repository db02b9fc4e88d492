use crate::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, StringRecord};
use ohno::{IntoAppError, bail};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::Read;

pub type Row = Map<String, Value>;

/// An in-memory table export.
///
/// Every row is a JSON object. A missing key and a `null` are both absent values, and so is
/// a blank string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Parse a JSON array of objects.
    pub fn from_json(text: &str, origin: &str) -> Result<Self> {
        let rows: Vec<Row> = serde_json::from_str(text).into_app_err_with(|| format!("'{origin}' is not a JSON array of objects"))?;
        Ok(Self { rows })
    }

    /// Parse CSV with a header row. Empty cells become `null`.
    pub fn from_csv(reader: impl Read, origin: &str) -> Result<Self> {
        let mut csv_reader = Reader::from_reader(reader);
        let headers = csv_reader
            .headers()
            .into_app_err_with(|| format!("unable to read the header row of '{origin}'"))?
            .clone();

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        while csv_reader
            .read_record(&mut record)
            .into_app_err_with(|| format!("unable to read row {} of '{origin}'", rows.len() + 1))?
        {
            let row = headers
                .iter()
                .zip(record.iter())
                .map(|(header, cell)| {
                    let value = if cell.is_empty() {
                        Value::Null
                    } else {
                        Value::String(cell.to_string())
                    };
                    (header.to_string(), value)
                })
                .collect();
            rows.push(row);
        }

        Ok(Self { rows })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> u64 {
        self.rows.len() as u64
    }

    /// Number of rows with a value in `column`.
    #[must_use]
    pub fn non_null(&self, column: &str) -> u64 {
        self.present(column).count() as u64
    }

    /// Number of rows whose value in `column` already appeared in an earlier row.
    #[must_use]
    pub fn duplicates(&self, column: &str) -> u64 {
        let mut seen = HashSet::new();
        let mut duplicates = 0;

        for value in self.present(column) {
            if !seen.insert(identity(value)) {
                duplicates += 1;
            }
        }

        duplicates
    }

    /// Number of rows whose timestamp in `column` lies within `[since, until]`.
    pub fn recent_rows(&self, column: &str, since: DateTime<Utc>, until: DateTime<Utc>) -> Result<u64> {
        let mut count = 0;

        for value in self.present(column) {
            let Some(at) = timestamp(value) else {
                bail!("column '{column}' holds '{value}', which is not an RFC 3339 timestamp");
            };

            if (since..=until).contains(&at) {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Values of `column`, most recent first by `order_by`.
    ///
    /// Rows missing either column are skipped. Rows with equal ordering keys keep their
    /// export order.
    pub fn most_recent(&self, column: &str, order_by: &str) -> Result<Vec<&Value>> {
        let mut keyed = Vec::new();

        for row in &self.rows {
            let (Some(value), Some(order)) = (present(row, column), present(row, order_by)) else {
                continue;
            };

            let Some(key) = ordering_key(order) else {
                bail!("column '{order_by}' holds '{order}', which is neither a number nor an RFC 3339 timestamp");
            };

            keyed.push((key, value));
        }

        keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));
        Ok(keyed.into_iter().map(|(_, value)| value).collect())
    }

    /// Up to `window` numeric samples of `column`, most recent first.
    pub fn samples(&self, column: &str, order_by: &str, window: usize) -> Result<Vec<f64>> {
        self.most_recent(column, order_by)?
            .into_iter()
            .take(window)
            .map(|value| match number(value) {
                Some(n) => Ok(n),
                None => Err(ohno::app_err!("column '{column}' holds '{value}', which is not a number")),
            })
            .collect()
    }

    /// Up to `window` samples of `column`, most recent first, scored 100 where the value equals
    /// `equals` and 0 elsewhere.
    pub fn rate_samples(&self, column: &str, equals: &str, order_by: &str, window: usize) -> Result<Vec<f64>> {
        Ok(self
            .most_recent(column, order_by)?
            .into_iter()
            .take(window)
            .map(|value| if identity(value) == equals.trim() { 100.0 } else { 0.0 })
            .collect())
    }

    /// The most recent value of `column`, if any row has one.
    pub fn latest(&self, column: &str, order_by: &str) -> Result<Option<&Value>> {
        Ok(self.most_recent(column, order_by)?.into_iter().next())
    }

    fn present<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> {
        self.rows.iter().filter_map(move |row| present(row, column))
    }
}

fn present<'a>(row: &'a Row, column: &str) -> Option<&'a Value> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    }
}

fn identity(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Interpret a JSON number or a numeric string. `NaN` and infinities are not numbers.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;

    n.is_finite().then_some(n)
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim()).ok().map(|at| at.with_timezone(&Utc)),
        _ => None,
    }
}

#[expect(clippy::cast_precision_loss, reason = "millisecond timestamps are well within f64's exact integer range")]
fn ordering_key(value: &Value) -> Option<f64> {
    number(value).or_else(|| timestamp(value).map(|at| at.timestamp_millis() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn table(value: Value) -> Table {
        Table::from_json(&value.to_string(), "test.json").unwrap()
    }

    #[test]
    fn test_from_json() {
        let t = table(json!([{"name": "Lincoln High"}, {"name": "Roosevelt"}]));
        assert_eq!(t.len(), 2);
        assert_eq!(t.row_count(), 2);
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let err = Table::from_json("{\"name\": 1}", "schools.json").unwrap_err();
        assert!(err.to_string().contains("schools.json"));
    }

    #[test]
    fn test_from_csv_empty_cells_are_null() {
        let csv = "name,website\nLincoln High,https://lincoln.example\nRoosevelt,\n";
        let t = Table::from_csv(csv.as_bytes(), "schools.csv").unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.non_null("name"), 2);
        assert_eq!(t.non_null("website"), 1);
    }

    #[test]
    fn test_from_csv_header_only_is_empty() {
        let t = Table::from_csv("name,website\n".as_bytes(), "schools.csv").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.row_count(), 0);
    }

    #[test]
    fn test_non_null_treats_missing_and_blank_as_absent() {
        let t = table(json!([
            {"website": "https://a.example"},
            {"website": null},
            {"website": "  "},
            {},
        ]));
        assert_eq!(t.non_null("website"), 1);
    }

    #[test]
    fn test_duplicates() {
        let t = table(json!([
            {"name": "Lincoln High"},
            {"name": "Roosevelt"},
            {"name": "Lincoln High"},
            {"name": " Lincoln High "},
            {"name": null},
            {"name": null},
        ]));
        assert_eq!(t.duplicates("name"), 2);
        assert_eq!(t.duplicates("missing"), 0);
    }

    #[test]
    fn test_recent_rows() {
        let t = table(json!([
            {"created_at": "2024-03-01T05:00:00Z"},
            {"created_at": "2024-02-27T00:00:00Z"},
            {"created_at": "2024-02-01T00:00:00Z"},
            {"created_at": null},
        ]));
        let until = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        let since = Utc.with_ymd_and_hms(2024, 2, 23, 6, 0, 0).unwrap();

        assert_eq!(t.recent_rows("created_at", since, until).unwrap(), 2);
    }

    #[test]
    fn test_recent_rows_rejects_bad_timestamp() {
        let t = table(json!([{"created_at": "yesterday"}]));
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();

        let err = t.recent_rows("created_at", now, now).unwrap_err();
        assert!(err.to_string().contains("created_at"));
    }

    #[test]
    fn test_samples_are_most_recent_first() {
        let t = table(json!([
            {"started_at": "2024-03-01T01:00:00Z", "duration_ms": 100},
            {"started_at": "2024-03-01T03:00:00Z", "duration_ms": "300"},
            {"started_at": "2024-03-01T02:00:00Z", "duration_ms": 200.5},
            {"started_at": "2024-03-01T04:00:00Z", "duration_ms": null},
        ]));

        assert_eq!(t.samples("duration_ms", "started_at", 10).unwrap(), [300.0, 200.5, 100.0]);
        assert_eq!(t.samples("duration_ms", "started_at", 2).unwrap(), [300.0, 200.5]);
    }

    #[test]
    fn test_samples_order_by_number() {
        let t = table(json!([
            {"id": 1, "v": 10},
            {"id": 3, "v": 30},
            {"id": 2, "v": 20},
        ]));
        assert_eq!(t.samples("v", "id", 3).unwrap(), [30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_samples_reject_non_numeric() {
        let t = table(json!([{"id": 1, "v": "fast"}]));
        let _ = t.samples("v", "id", 3).unwrap_err();
    }

    #[test]
    fn test_samples_of_empty_table() {
        let t = Table::default();
        assert!(t.samples("v", "id", 3).unwrap().is_empty());
    }

    #[test]
    fn test_rate_samples() {
        let t = table(json!([
            {"started_at": "2024-03-01T01:00:00Z", "status": "success"},
            {"started_at": "2024-03-01T02:00:00Z", "status": "failed"},
            {"started_at": "2024-03-01T03:00:00Z", "status": "success"},
        ]));

        assert_eq!(t.rate_samples("status", "success", "started_at", 10).unwrap(), [100.0, 0.0, 100.0]);
        assert_eq!(t.rate_samples("status", "success", "started_at", 1).unwrap(), [100.0]);
    }

    #[test]
    fn test_latest() {
        let t = table(json!([
            {"finished_at": "2024-03-01T01:00:00Z", "status": "success"},
            {"finished_at": "2024-03-01T02:00:00Z", "status": "failed"},
        ]));

        assert_eq!(t.latest("status", "finished_at").unwrap(), Some(&json!("failed")));
        assert_eq!(t.latest("missing", "finished_at").unwrap(), None);
    }

    #[test]
    fn test_most_recent_rejects_unorderable_key() {
        let t = table(json!([{"finished_at": "soon", "status": "success"}]));
        let _ = t.latest("status", "finished_at").unwrap_err();
    }

    #[test]
    fn test_number() {
        assert_eq!(number(&json!(4)), Some(4.0));
        assert_eq!(number(&json!(" 4.5 ")), Some(4.5));
        assert_eq!(number(&json!("four")), None);
        assert_eq!(number(&json!(true)), None);
    }

    #[test]
    fn test_non_finite_strings_are_not_numbers() {
        for text in ["NaN", "nan", "inf", "-inf", "infinity", "1e400"] {
            assert_eq!(number(&json!(text)), None, "{text}");
        }
    }

    #[test]
    fn test_nan_ordering_key_is_rejected() {
        let t = table(json!([
            {"id": "NaN", "status": "failed"},
            {"id": 2, "status": "success"}
        ]));
        let _ = t.latest("status", "id").unwrap_err();
    }

    #[test]
    fn test_samples_reject_non_finite_values() {
        let t = table(json!([{"id": 1, "v": "inf"}, {"id": 2, "v": 10}]));
        let _ = t.samples("v", "id", 5).unwrap_err();
    }
}
