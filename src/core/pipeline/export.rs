//! Export mode: search API to snapshot files

use super::stage::{EntityRun, EntityStage};
use super::summary::{EntitySummary, RunSummary};
use crate::adapters::alvys::{AccessToken, AlvysApi, EndpointSpec, Paginator};
use crate::adapters::credentials::TenantCredentials;
use crate::config::FilterVariant;
use crate::core::snapshot::SnapshotStore;
use crate::domain::{tag_records, AlvysError, DateWindow, EntityKind, FileId, Result};
use crate::log_error_with_context;
use std::time::Instant;

/// What one export run covers
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub entities: Vec<EntityKind>,
    /// Windows for partitioned entities; ignored by the others
    pub windows: Vec<DateWindow>,
    pub filter: FilterVariant,
    pub max_items: Option<usize>,
}

/// Fetches entities page by page and stores them as snapshots
///
/// Entities, windows and pages are processed one at a time. The access
/// token is requested on first use and reused for the rest of the run.
pub struct ExportDriver<'a, A: AlvysApi + ?Sized> {
    api: &'a A,
    snapshots: &'a SnapshotStore,
    credentials: TenantCredentials,
    page_size: usize,
    token: Option<AccessToken>,
}

impl<'a, A: AlvysApi + ?Sized> ExportDriver<'a, A> {
    pub fn new(
        api: &'a A,
        snapshots: &'a SnapshotStore,
        credentials: TenantCredentials,
        page_size: usize,
    ) -> Self {
        Self {
            api,
            snapshots,
            credentials,
            page_size,
            token: None,
        }
    }

    /// Runs every requested entity in order
    ///
    /// # Errors
    ///
    /// The first failing entity aborts the run. Snapshots already written
    /// stay on disk.
    pub async fn run(&mut self, request: &ExportRequest) -> Result<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::new("export");

        tracing::info!(
            entities = request.entities.len(),
            windows = request.windows.len(),
            filter = %request.filter,
            "Starting export"
        );

        for &entity in &request.entities {
            let mut run = EntityRun::new(entity);
            match self.export_entity(&mut run, request).await {
                Ok(entity_summary) => summary.entities.push(entity_summary),
                Err(e) => {
                    run.fail();
                    log_error_with_context!(&e, format!("Export of {entity} failed"));
                    return Err(e);
                }
            }
        }

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn token(&mut self) -> Result<AccessToken> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }

        let token = self.api.acquire_token(&self.credentials).await?;
        tracing::debug!(tenant_id = %self.credentials.tenant_id, "Token cached for run");
        self.token = Some(token.clone());
        Ok(token)
    }

    async fn export_entity(
        &mut self,
        run: &mut EntityRun,
        request: &ExportRequest,
    ) -> Result<EntitySummary> {
        let entity = run.entity();
        let started = Instant::now();
        let endpoint = EndpointSpec::for_entity(entity, request.filter);
        let mut summary = EntitySummary::new(entity);

        let windows: Vec<Option<&DateWindow>> = if endpoint.is_partitioned() {
            if request.windows.is_empty() {
                return Err(AlvysError::Validation(format!(
                    "{entity} is partitioned by date but no window was given"
                )));
            }
            request.windows.iter().map(Some).collect()
        } else {
            vec![None]
        };

        let token = self.token().await?;
        run.advance(EntityStage::TokenAcquired);

        let paginator =
            Paginator::new(self.api, self.page_size).with_max_items(request.max_items);

        for window in windows {
            match window {
                Some(w) => println!("Fetching {entity} for {w}..."),
                None => println!("Fetching {entity}..."),
            }

            let payload = endpoint.base_payload(window);
            let mut on_page = |page: u32| run.advance(EntityStage::Fetching { page });
            let mut records = paginator
                .fetch_all(entity, &token, &payload, &mut on_page)
                .await?;
            run.advance(EntityStage::Fetched);

            let file_id = FileId::now();
            tag_records(&mut records, &file_id);

            let path = self.snapshots.write(entity, window, &records)?;
            run.advance(EntityStage::Written);

            println!(
                "✅ Saved {} {entity} records to {}",
                records.len(),
                path.display()
            );
            tracing::info!(
                entity = %entity,
                window = ?window.map(DateWindow::label),
                records = records.len(),
                file_id = %file_id,
                "Window exported"
            );

            if window.is_some() {
                summary.windows += 1;
            }
            summary.records += records.len();
            summary.snapshot_files.push(path);
        }

        summary.stage = run.stage();
        summary.duration = started.elapsed();
        Ok(summary)
    }
}
