//! Field coercion helpers
//!
//! Every helper is total: a missing, null or malformed source value becomes
//! [`SqlValue::Null`] (or `0` for flags), never an error.

use crate::domain::{lookup, RawRecord, SanitizedRow, SqlValue, TableSpec};
use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

/// Renders a scalar JSON value as text
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Value at `path` as text, unchanged
pub fn text(record: &RawRecord, path: &str) -> SqlValue {
    lookup(record, path).and_then(render).into()
}

/// Value at `path` as trimmed text; blank becomes null
pub fn clean_text(record: &RawRecord, path: &str) -> SqlValue {
    lookup(record, path)
        .and_then(render)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .into()
}

/// Value at `path` as `f64`
///
/// Numbers pass through; strings are trimmed and parsed. Blank or
/// unparseable strings and non-finite results are null.
pub fn decimal(record: &RawRecord, path: &str) -> SqlValue {
    let parsed = match lookup(record, path) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|d| d.is_finite()).into()
}

/// Money or measure at `path`, given either as `{"Amount": n}` or as a bare
/// number
pub fn amount(record: &RawRecord, path: &str) -> SqlValue {
    match decimal(record, &format!("{path}.Amount")) {
        SqlValue::Null => decimal(record, path),
        value => value,
    }
}

/// Parses a UTC timestamp carrying a `Z` suffix
///
/// Offsets other than `Z`, date-only strings and anything unparseable
/// yield `None`.
pub fn parse_utc(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if !raw.ends_with('Z') && !raw.ends_with('z') {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Value at `path` as a naive UTC timestamp
pub fn timestamp(record: &RawRecord, path: &str) -> SqlValue {
    lookup(record, path)
        .and_then(Value::as_str)
        .and_then(parse_utc)
        .into()
}

/// First timestamp found among `paths`
pub fn first_timestamp(record: &RawRecord, paths: &[&str]) -> SqlValue {
    paths
        .iter()
        .map(|path| timestamp(record, path))
        .find(|v| !v.is_null())
        .unwrap_or(SqlValue::Null)
}

/// Boolean-like value at `path` as `0` or `1`
///
/// `true`, non-zero numbers and the strings `true`, `yes`, `y`, `1` are `1`.
/// Everything else, including a missing field, is `0`.
pub fn flag(record: &RawRecord, path: &str) -> SqlValue {
    let set = match lookup(record, path) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|d| d != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    };
    SqlValue::Integer(i64::from(set))
}

/// Builds a row by column name
///
/// Columns not set stay null. Setting a column the table does not carry is
/// ignored, which lets one sanitizer feed several schema layouts.
pub struct RowBuilder {
    table: &'static TableSpec,
    values: Vec<SqlValue>,
}

impl RowBuilder {
    pub fn new(table: &'static TableSpec) -> Self {
        Self {
            table,
            values: vec![SqlValue::Null; table.columns.len()],
        }
    }

    pub fn set(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        if let Some(idx) = self.table.column_index(column) {
            self.values[idx] = value.into();
        }
        self
    }

    pub fn build(self) -> SanitizedRow {
        SanitizedRow::new(self.table, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Column;
    use chrono::NaiveDate;
    use serde_json::json;
    use test_case::test_case;

    fn rec(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test_case(json!(12.5), Some(12.5) ; "number")]
    #[test_case(json!(" 7 "), Some(7.0) ; "padded string")]
    #[test_case(json!(""), None ; "empty string")]
    #[test_case(json!("n/a"), None ; "unparseable")]
    #[test_case(json!("NaN"), None ; "nan string")]
    #[test_case(json!(null), None ; "null")]
    #[test_case(json!(true), None ; "boolean")]
    fn test_decimal(input: Value, expected: Option<f64>) {
        let record = rec(json!({"V": input}));
        assert_eq!(decimal(&record, "V"), SqlValue::from(expected));
    }

    #[test_case("2025-06-01T08:30:00Z", Some((8, 30, 0, 0)) ; "seconds")]
    #[test_case("2025-06-01T08:30:00.123Z", Some((8, 30, 0, 123)) ; "millis")]
    #[test_case("2025-06-01T08:30:00.1234567Z", Some((8, 30, 0, 123)) ; "ticks")]
    #[test_case("2025-06-01T08:30:00+02:00", None ; "offset")]
    #[test_case("2025-06-01", None ; "date only")]
    #[test_case("yesterday", None ; "garbage")]
    fn test_parse_utc(input: &str, expected: Option<(u32, u32, u32, u32)>) {
        let parsed = parse_utc(input);
        let expected = expected.map(|(h, m, s, ms)| {
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_milli_opt(h, m, s, ms)
                .unwrap()
        });
        assert_eq!(
            parsed.map(|p| p.and_utc().timestamp_millis()),
            expected.map(|e| e.and_utc().timestamp_millis())
        );
    }

    #[test_case(json!(true), 1 ; "true")]
    #[test_case(json!(false), 0 ; "false")]
    #[test_case(json!(1), 1 ; "one")]
    #[test_case(json!(0), 0 ; "zero")]
    #[test_case(json!("Yes"), 1 ; "yes string")]
    #[test_case(json!("false"), 0 ; "false string")]
    #[test_case(json!(null), 0 ; "null")]
    fn test_flag(input: Value, expected: i64) {
        let record = rec(json!({"F": input}));
        assert_eq!(flag(&record, "F"), SqlValue::Integer(expected));
    }

    #[test]
    fn test_flag_missing_is_zero() {
        assert_eq!(flag(&RawRecord::new(), "Missing"), SqlValue::Integer(0));
    }

    #[test]
    fn test_text_and_clean_text() {
        let record = rec(json!({"A": "  x  ", "B": "   ", "N": 2019, "O": {"Id": 1}}));

        assert_eq!(text(&record, "A"), SqlValue::Text("  x  ".into()));
        assert_eq!(clean_text(&record, "A"), SqlValue::Text("x".into()));
        assert_eq!(clean_text(&record, "B"), SqlValue::Null);
        assert_eq!(text(&record, "N"), SqlValue::Text("2019".into()));
        assert_eq!(text(&record, "O.Id"), SqlValue::Text("1".into()));
        assert_eq!(text(&record, "O.Missing"), SqlValue::Null);
    }

    #[test]
    fn test_amount_accepts_object_or_number() {
        let record = rec(json!({"Rate": {"Amount": 10.5}, "Paid": "3", "Bad": {"Currency": "USD"}}));

        assert_eq!(amount(&record, "Rate"), SqlValue::Decimal(10.5));
        assert_eq!(amount(&record, "Paid"), SqlValue::Decimal(3.0));
        assert_eq!(amount(&record, "Bad"), SqlValue::Null);
    }

    #[test]
    fn test_first_timestamp_falls_back() {
        let record = rec(json!({
            "AppointmentDate": null,
            "StopWindow": {"Begin": "2025-06-02T10:00:00Z"}
        }));
        let value = first_timestamp(&record, &["AppointmentDate", "StopWindow.Begin"]);
        assert!(matches!(value, SqlValue::Timestamp(_)));
    }

    static PAIR: TableSpec = TableSpec {
        name: "PAIR_RAW",
        columns: &[Column::text("A", 3), Column::integer("B")],
    };

    #[test]
    fn test_row_builder_ignores_unknown_columns() {
        let row = RowBuilder::new(&PAIR)
            .set("A", SqlValue::Text("abcdef".into()))
            .set("EXTRA", SqlValue::Integer(9))
            .build();

        assert_eq!(row.values(), &[SqlValue::Text("abc".into()), SqlValue::Null]);
    }
}
