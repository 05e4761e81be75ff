//! Typed relational rows

use chrono::NaiveDateTime;
use std::fmt;

/// A scalar cell value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Maps non-finite decimals to `Null`
    pub fn normalized(self) -> Self {
        match self {
            SqlValue::Decimal(d) if !d.is_finite() => SqlValue::Null,
            other => other,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Text)
    }
}

impl From<Option<f64>> for SqlValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Decimal)
    }
}

impl From<Option<NaiveDateTime>> for SqlValue {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Timestamp)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

/// Storage kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Text with a maximum length in characters
    Text(usize),
    Integer,
    Decimal,
    Timestamp,
}

impl ColumnKind {
    /// PostgreSQL type used to cast bound parameters
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Text(_) => "TEXT",
            ColumnKind::Integer => "INT8",
            ColumnKind::Decimal => "FLOAT8",
            ColumnKind::Timestamp => "TIMESTAMP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn text(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            kind: ColumnKind::Text(max_len),
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
        }
    }

    pub const fn decimal(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Decimal,
        }
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Timestamp,
        }
    }
}

/// Fixed column layout of one warehouse table
///
/// The audit column `INSERTED_DTTM` is not listed; the writer appends it.
#[derive(Debug, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSpec {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

impl fmt::Display for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One row shaped for a specific table
///
/// Values are held in the table's column order. Text values longer than
/// their column's width are cut at the width.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedRow {
    table: &'static TableSpec,
    values: Vec<SqlValue>,
}

impl SanitizedRow {
    pub fn new(table: &'static TableSpec, values: Vec<SqlValue>) -> Self {
        debug_assert_eq!(
            table.columns.len(),
            values.len(),
            "row width does not match {}",
            table.name
        );

        let values = values
            .into_iter()
            .zip(table.columns)
            .map(|(value, column)| match (value, column.kind) {
                (SqlValue::Text(s), ColumnKind::Text(max)) if s.chars().count() > max => {
                    SqlValue::Text(s.chars().take(max).collect())
                }
                (value, _) => value,
            })
            .collect();

        Self { table, values }
    }

    pub fn table(&self) -> &'static TableSpec {
        self.table
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Value of a column by name
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.table
            .column_index(column)
            .and_then(|i| self.values.get(i))
    }
}
