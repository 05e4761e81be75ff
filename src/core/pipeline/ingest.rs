//! Ingest mode: snapshot files to warehouse tables

use super::handlers::{HandlerRegistry, TableBatch};
use super::stage::{EntityRun, EntityStage};
use super::summary::{EntitySummary, RunSummary};
use crate::core::load::{BatchWriter, WarehouseSession};
use crate::core::snapshot::SnapshotStore;
use crate::domain::{AlvysError, DateWindow, EntityKind, Result};
use crate::log_error_with_context;
use std::time::Instant;

/// What one ingest run covers
#[derive(Debug, Clone, Default)]
pub struct IngestRequest {
    pub entities: Vec<EntityKind>,
    /// Windows to load for partitioned entities; `None` loads every stored
    /// window
    pub windows: Option<Vec<DateWindow>>,
}

/// Reads snapshots back and loads them through the handler registry
///
/// All windows of one entity are sanitized first and then written as one
/// batch per table, so every row of a table shares one `INSERTED_DTTM`.
pub struct IngestDriver<'a> {
    snapshots: &'a SnapshotStore,
    registry: &'a HandlerRegistry,
    writer: &'a BatchWriter,
    session: &'a mut dyn WarehouseSession,
}

impl<'a> IngestDriver<'a> {
    pub fn new(
        snapshots: &'a SnapshotStore,
        registry: &'a HandlerRegistry,
        writer: &'a BatchWriter,
        session: &'a mut dyn WarehouseSession,
    ) -> Self {
        Self {
            snapshots,
            registry,
            writer,
            session,
        }
    }

    /// Loads every requested entity in order
    ///
    /// # Errors
    ///
    /// The first failing entity aborts the run. Tables committed before the
    /// failure keep their rows.
    pub async fn run(&mut self, request: &IngestRequest) -> Result<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::new("insert");

        tracing::info!(
            entities = request.entities.len(),
            schema = %self.writer.schema(),
            session = %self.session.describe(),
            "Starting ingest"
        );

        for &entity in &request.entities {
            let mut run = EntityRun::new(entity);
            match self.ingest_entity(&mut run, request).await {
                Ok(entity_summary) => summary.entities.push(entity_summary),
                Err(e) => {
                    run.fail();
                    log_error_with_context!(&e, format!("Insert of {entity} failed"));
                    return Err(e);
                }
            }
        }

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    fn windows_for(&self, entity: EntityKind, request: &IngestRequest) -> Result<Vec<DateWindow>> {
        match &request.windows {
            Some(windows) => Ok(windows.clone()),
            None => self.snapshots.list_windows(entity),
        }
    }

    async fn ingest_entity(
        &mut self,
        run: &mut EntityRun,
        request: &IngestRequest,
    ) -> Result<EntitySummary> {
        let entity = run.entity();
        let started = Instant::now();
        let handler = self.registry.get(entity).ok_or_else(|| {
            AlvysError::Configuration(format!("No ingest handler registered for {entity}"))
        })?;
        let mut summary = EntitySummary::new(entity);

        let records = if entity.is_partitioned() {
            let windows = self.windows_for(entity, request)?;
            if windows.is_empty() {
                println!("No {entity} snapshots found in {}", self.snapshots.root().display());
            }

            let mut records = Vec::new();
            for window in &windows {
                let path = self.snapshots.path_for(entity, Some(window))?;
                println!("Loading {entity} from {}...", path.display());
                records.extend(self.snapshots.read_window(entity, window)?);
                summary.snapshot_files.push(path);
            }
            summary.windows = windows.len();
            records
        } else {
            let path = self.snapshots.path_for(entity, None)?;
            println!("Loading {entity} from {}...", path.display());
            let records = self.snapshots.read(entity)?;
            summary.snapshot_files.push(path);
            records
        };
        summary.records = records.len();
        run.advance(EntityStage::Fetched);

        let batches: Vec<TableBatch> = handler.sanitize(&records);
        for batch in &batches {
            let report = self
                .writer
                .write(&mut *self.session, batch.table, &batch.rows)
                .await?;
            summary.tables.push(report);
        }
        run.advance(EntityStage::Written);

        summary.stage = run.stage();
        summary.duration = started.elapsed();
        tracing::info!(
            entity = %entity,
            records = summary.records,
            rows = summary.rows_written(),
            "Entity ingested"
        );
        Ok(summary)
    }
}
