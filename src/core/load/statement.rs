//! Parameterized multi-row INSERT statements

use crate::domain::{ColumnKind, SanitizedRow, SqlValue, TableSpec};
use chrono::NaiveDateTime;

/// Audit column appended to every insert
pub const INSERTED_DTTM: &str = "INSERTED_DTTM";

/// Quotes a PostgreSQL identifier
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `"<schema>"."<prefix><table>"`
pub fn qualified_table(schema: &str, table_prefix: &str, table: &str) -> String {
    format!(
        "{}.{}",
        quote_ident(schema),
        quote_ident(&format!("{table_prefix}{table}"))
    )
}

/// One INSERT covering a chunk of rows
///
/// Every placeholder carries an explicit cast so that NULL parameters are
/// typed by the column kind rather than inferred.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    /// Bound values in placeholder order, each with its column kind
    pub params: Vec<(ColumnKind, SqlValue)>,
    pub rows: usize,
}

impl InsertStatement {
    /// Builds the statement for `rows`, stamping each with `inserted_at`
    ///
    /// Non-finite decimals are bound as NULL.
    pub fn build(
        target: &str,
        table: &TableSpec,
        rows: &[SanitizedRow],
        inserted_at: NaiveDateTime,
    ) -> Self {
        let mut column_list: Vec<String> = table
            .columns
            .iter()
            .map(|c| quote_ident(c.name))
            .collect();
        column_list.push(quote_ident(INSERTED_DTTM));

        let width = table.columns.len() + 1;
        let mut params = Vec::with_capacity(rows.len() * width);
        let mut tuples = Vec::with_capacity(rows.len());

        for row in rows {
            let mut placeholders = Vec::with_capacity(width);

            for (column, value) in table.columns.iter().zip(row.values()) {
                params.push((column.kind, value.clone().normalized()));
                placeholders.push(format!("${}::{}", params.len(), column.kind.sql_type()));
            }

            params.push((ColumnKind::Timestamp, SqlValue::Timestamp(inserted_at)));
            placeholders.push(format!(
                "${}::{}",
                params.len(),
                ColumnKind::Timestamp.sql_type()
            ));

            tuples.push(format!("({})", placeholders.join(", ")));
        }

        let sql = format!(
            "INSERT INTO {target} ({}) VALUES {}",
            column_list.join(", "),
            tuples.join(", ")
        );

        Self {
            sql,
            params,
            rows: rows.len(),
        }
    }
}
