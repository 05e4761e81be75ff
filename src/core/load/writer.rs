//! Chunked, transactional table writes

use super::session::WarehouseSession;
use super::statement::{qualified_table, InsertStatement};
use crate::config::WarehouseConfig;
use crate::domain::{AlvysError, Result, SanitizedRow, TableSpec, WarehouseError};
use crate::log_table_written;
use chrono::{NaiveDateTime, Utc};
use std::time::{Duration, Instant};

/// Default number of rows per INSERT statement
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Outcome of one table write
#[derive(Debug, Clone, PartialEq)]
pub struct WriteReport {
    pub table: &'static str,
    pub rows: usize,
    pub chunks: usize,
    pub duration: Duration,
    /// Audit timestamp shared by every row; `None` when nothing was written
    pub inserted_at: Option<NaiveDateTime>,
}

/// Writes sanitized rows into one schema
#[derive(Debug, Clone)]
pub struct BatchWriter {
    schema: String,
    table_prefix: String,
    chunk_size: usize,
}

impl BatchWriter {
    pub fn new(schema: impl Into<String>, table_prefix: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            schema: schema.into(),
            table_prefix: table_prefix.into(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Writer for `scac`'s schema using the warehouse settings
    pub fn from_config(config: &WarehouseConfig, scac: &str) -> Self {
        Self::new(
            config.schema_for(scac),
            config.table_prefix.clone(),
            config.chunk_size,
        )
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Fully qualified, quoted name of `table`
    pub fn target(&self, table: &TableSpec) -> String {
        qualified_table(&self.schema, &self.table_prefix, table.name)
    }

    /// Persists every row of `rows` into `table` in one transaction
    ///
    /// All rows share a single `INSERTED_DTTM` captured before the first
    /// chunk. An empty input touches nothing.
    ///
    /// # Errors
    ///
    /// Rows shaped for a different table are rejected before any I/O. A
    /// failing chunk rolls the transaction back and fails the table.
    pub async fn write(
        &self,
        session: &mut dyn WarehouseSession,
        table: &'static TableSpec,
        rows: &[SanitizedRow],
    ) -> Result<WriteReport> {
        if rows.is_empty() {
            println!("No data to insert for {table}.");
            tracing::info!(table = %table, "No data to insert");
            return Ok(WriteReport {
                table: table.name,
                rows: 0,
                chunks: 0,
                duration: Duration::ZERO,
                inserted_at: None,
            });
        }

        if let Some(row) = rows.iter().find(|r| !std::ptr::eq(r.table(), table)) {
            return Err(AlvysError::Validation(format!(
                "Row shaped for {} ({} columns) passed to writer for {} ({} columns)",
                row.table(),
                row.table().columns.len(),
                table,
                table.columns.len()
            )));
        }

        let inserted_at = Utc::now().naive_utc();
        let started = Instant::now();
        let target = self.target(table);

        session.begin().await?;

        let mut chunks = 0;
        for chunk in rows.chunks(self.chunk_size) {
            let statement = InsertStatement::build(&target, table, chunk, inserted_at);

            if let Err(e) = session.insert(&statement).await {
                tracing::error!(
                    table = %table,
                    chunk = chunks,
                    error = %e,
                    "Insert failed, rolling back"
                );
                if let Err(rollback_err) = session.rollback().await {
                    tracing::warn!(table = %table, error = %rollback_err, "Rollback failed");
                }
                return Err(match e {
                    AlvysError::Warehouse(WarehouseError::InsertFailed { .. }) => e,
                    other => WarehouseError::InsertFailed {
                        table: table.name.to_string(),
                        message: other.to_string(),
                    }
                    .into(),
                });
            }

            chunks += 1;
            tracing::debug!(table = %table, chunk = chunks, rows = chunk.len(), "Chunk inserted");
        }

        session.commit().await?;

        let duration = started.elapsed();
        println!(
            "✅ Inserted {} records into {} in {:.2} seconds",
            rows.len(),
            table,
            duration.as_secs_f64()
        );
        log_table_written!(table, rows.len(), duration);

        Ok(WriteReport {
            table: table.name,
            rows: rows.len(),
            chunks,
            duration,
            inserted_at: Some(inserted_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, SqlValue};
    use async_trait::async_trait;

    static ITEMS: TableSpec = TableSpec {
        name: "ITEMS_RAW",
        columns: &[Column::text("ID", 20), Column::decimal("WEIGHT")],
    };

    static OTHER: TableSpec = TableSpec {
        name: "OTHER_RAW",
        columns: &[Column::text("ID", 20), Column::decimal("WEIGHT")],
    };

    #[derive(Default)]
    struct RecordingSession {
        log: Vec<String>,
        statements: Vec<InsertStatement>,
        fail_on_insert: Option<usize>,
    }

    #[async_trait]
    impl WarehouseSession for RecordingSession {
        async fn begin(&mut self) -> Result<()> {
            self.log.push("BEGIN".to_string());
            Ok(())
        }

        async fn insert(&mut self, statement: &InsertStatement) -> Result<u64> {
            if self.fail_on_insert == Some(self.statements.len()) {
                return Err(WarehouseError::QueryFailed("constraint violated".to_string()).into());
            }
            self.log.push(format!("INSERT {}", statement.rows));
            self.statements.push(statement.clone());
            Ok(statement.rows as u64)
        }

        async fn commit(&mut self) -> Result<()> {
            self.log.push("COMMIT".to_string());
            Ok(())
        }

        async fn rollback(&mut self) -> Result<()> {
            self.log.push("ROLLBACK".to_string());
            Ok(())
        }

        fn describe(&self) -> String {
            "recording".to_string()
        }
    }

    fn rows(table: &'static TableSpec, n: usize) -> Vec<SanitizedRow> {
        (0..n)
            .map(|i| {
                SanitizedRow::new(
                    table,
                    vec![SqlValue::Text(format!("R{i}")), SqlValue::Decimal(i as f64)],
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_empty_write_is_noop() {
        let mut session = RecordingSession::default();
        let writer = BatchWriter::new("QWIK", "", DEFAULT_CHUNK_SIZE);

        let report = writer.write(&mut session, &ITEMS, &[]).await.unwrap();

        assert_eq!(report.rows, 0);
        assert!(report.inserted_at.is_none());
        assert!(session.log.is_empty());
    }

    #[tokio::test]
    async fn test_chunks_share_one_timestamp() {
        let mut session = RecordingSession::default();
        let writer = BatchWriter::new("QWIK", "", DEFAULT_CHUNK_SIZE);

        let report = writer
            .write(&mut session, &ITEMS, &rows(&ITEMS, 1201))
            .await
            .unwrap();

        assert_eq!(report.rows, 1201);
        assert_eq!(report.chunks, 3);
        assert_eq!(
            session.log,
            vec!["BEGIN", "INSERT 500", "INSERT 500", "INSERT 201", "COMMIT"]
        );

        let stamp = report.inserted_at.unwrap();
        for statement in &session.statements {
            let stamps: Vec<_> = statement
                .params
                .iter()
                .skip(2)
                .step_by(3)
                .map(|(_, v)| v.clone())
                .collect();
            assert!(stamps.iter().all(|v| *v == SqlValue::Timestamp(stamp)));
        }
        assert!(session.statements[0].sql.starts_with("INSERT INTO \"QWIK\".\"ITEMS_RAW\""));
    }

    #[tokio::test]
    async fn test_failed_chunk_rolls_back() {
        let mut session = RecordingSession {
            fail_on_insert: Some(1),
            ..Default::default()
        };
        let writer = BatchWriter::new("QWIK", "", 2);

        let err = writer
            .write(&mut session, &ITEMS, &rows(&ITEMS, 5))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AlvysError::Warehouse(WarehouseError::InsertFailed { ref table, .. }) if table == "ITEMS_RAW"
        ));
        assert_eq!(session.log, vec!["BEGIN", "INSERT 2", "ROLLBACK"]);
    }

    #[tokio::test]
    async fn test_rejects_rows_for_other_table() {
        let mut session = RecordingSession::default();
        let writer = BatchWriter::new("QWIK", "", DEFAULT_CHUNK_SIZE);

        let err = writer
            .write(&mut session, &ITEMS, &rows(&OTHER, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, AlvysError::Validation(_)));
        assert!(session.log.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_rows_for_other_layout_of_same_table() {
        use crate::config::SchemaLayout;
        use crate::core::sanitize::sanitize_truck;
        use crate::core::sanitize::tables::TRUCKS;
        use serde_json::json;

        let truck = json!({"Id": "TR1", "Status": "Active"})
            .as_object()
            .cloned()
            .unwrap();
        let extended = sanitize_truck(&truck, SchemaLayout::Extended);
        assert_eq!(extended.table().name, TRUCKS.name);

        let mut session = RecordingSession::default();
        let writer = BatchWriter::new("QWIK", "", DEFAULT_CHUNK_SIZE);

        let err = writer
            .write(&mut session, &TRUCKS, &[extended])
            .await
            .unwrap_err();

        assert!(matches!(err, AlvysError::Validation(_)));
        assert!(session.log.is_empty());
        assert!(session.statements.is_empty());

        let standard = sanitize_truck(&truck, SchemaLayout::Standard);
        let report = writer.write(&mut session, &TRUCKS, &[standard]).await.unwrap();
        assert_eq!(report.rows, 1);
    }
}
