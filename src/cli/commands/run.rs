//! Arguments and steps shared by `export`, `insert` and `export-insert`

use crate::adapters::alvys::AlvysClient;
use crate::adapters::credentials::{
    create_credential_store, normalize_scac, CredentialCache, TenantCredentials,
};
use crate::adapters::postgresql::{ConnectOptions, PostgreSQLClient};
use crate::config::{AlvysConfig, FilterVariant};
use crate::core::load::BatchWriter;
use crate::core::pipeline::{
    ExportDriver, ExportRequest, HandlerRegistry, IngestDriver, IngestRequest, RunSummary,
};
use crate::core::snapshot::SnapshotStore;
use crate::domain::{AlvysError, DateWindow, EntityKind, Result};
use chrono::{DateTime, Utc};
use clap::Args;

/// Entity selection, tenant and window options
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Entities to process, or `all`
    #[arg(value_name = "ENTITY", default_value = "all")]
    pub entities: Vec<String>,

    /// Tenant SCAC; also the default warehouse schema
    #[arg(long)]
    pub scac: String,

    /// Print what would run and exit before any network or storage I/O
    #[arg(long)]
    pub dry_run: bool,

    /// Which Sunday-to-Saturday week to export (1 = last week)
    #[arg(long, value_name = "N")]
    pub weeks_ago: Option<u32>,

    /// Explicit window, repeatable; overrides --weeks-ago
    #[arg(long = "window", value_name = "YYYY-MM-DD..YYYY-MM-DD")]
    pub windows: Vec<DateWindow>,

    /// Cap on records fetched per entity and window
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Filter set: all-statuses or active-only
    #[arg(long)]
    pub filter: Option<FilterVariant>,
}

impl RunArgs {
    pub fn scac(&self) -> String {
        normalize_scac(&self.scac)
    }

    /// Selected entities in canonical order
    ///
    /// # Errors
    ///
    /// Unknown entity names are a configuration error.
    pub fn entities(&self) -> Result<Vec<EntityKind>> {
        EntityKind::resolve_selection(&self.entities).map_err(AlvysError::Configuration)
    }

    /// Windows to fetch: explicit ones, else the `--weeks-ago` week
    ///
    /// # Errors
    ///
    /// A `--weeks-ago` beyond the supported date range is a validation error.
    pub fn export_windows(&self, now: DateTime<Utc>) -> Result<Vec<DateWindow>> {
        if !self.windows.is_empty() {
            return Ok(self.windows.clone());
        }
        let window = DateWindow::week_range(now, self.weeks_ago.unwrap_or(1))
            .map_err(AlvysError::Validation)?;
        Ok(vec![window])
    }

    /// Windows to load; `None` means every stored window
    pub fn ingest_windows(&self, now: DateTime<Utc>) -> Result<Option<Vec<DateWindow>>> {
        if !self.windows.is_empty() {
            return Ok(Some(self.windows.clone()));
        }
        self.weeks_ago
            .map(|weeks| {
                DateWindow::week_range(now, weeks)
                    .map(|window| vec![window])
                    .map_err(AlvysError::Validation)
            })
            .transpose()
    }

    pub fn export_request(&self, config: &AlvysConfig, now: DateTime<Utc>) -> Result<ExportRequest> {
        Ok(ExportRequest {
            entities: self.entities()?,
            windows: self.export_windows(now)?,
            filter: self.filter.unwrap_or(config.export.filter_variant),
            max_items: self.max_items.or(config.api.max_items),
        })
    }

    pub fn ingest_request(&self, now: DateTime<Utc>) -> Result<IngestRequest> {
        Ok(IngestRequest {
            entities: self.entities()?,
            windows: self.ingest_windows(now)?,
        })
    }

    /// `[DRY‑RUN] Would export: ...` line
    pub fn describe_export(&self, now: DateTime<Utc>) -> Result<String> {
        let names = entity_names(&self.entities()?);
        let ranges: Vec<String> = self
            .export_windows(now)?
            .iter()
            .map(|w| format!("range {} → {}", w.start_iso(), w.end_iso()))
            .collect();
        Ok(format!(
            "[DRY‑RUN] Would export: {names} for {} {}",
            self.scac(),
            ranges.join(", ")
        ))
    }

    /// `[DRY‑RUN] Would insert: ...` line
    pub fn describe_insert(&self) -> Result<String> {
        Ok(format!(
            "[DRY‑RUN] Would insert: {} into schema {}",
            entity_names(&self.entities()?),
            self.scac()
        ))
    }
}

fn entity_names(entities: &[EntityKind]) -> String {
    entities
        .iter()
        .map(EntityKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Looks the tenant up once through the configured store
pub async fn resolve_credentials(config: &AlvysConfig, scac: &str) -> Result<TenantCredentials> {
    let store = create_credential_store(config)?;
    let mut cache = CredentialCache::new();
    cache.resolve(store.as_ref(), scac).await
}

/// Runs the export half of a command
pub async fn run_export(
    config: &AlvysConfig,
    args: &RunArgs,
    credentials: TenantCredentials,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let request = args.export_request(config, now)?;
    let client = AlvysClient::new(&config.api)?;
    let snapshots = SnapshotStore::new(&config.application.data_dir);

    ExportDriver::new(&client, &snapshots, credentials, config.api.page_size)
        .run(&request)
        .await
}

/// Runs the insert half of a command over one warehouse connection
pub async fn run_insert(
    config: &AlvysConfig,
    args: &RunArgs,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let request = args.ingest_request(now)?;
    let warehouse = config.warehouse.as_ref().ok_or_else(|| {
        AlvysError::Configuration("[warehouse] section is required for insert".to_string())
    })?;

    let options = ConnectOptions::from_config(warehouse);
    let mut session = PostgreSQLClient::connect(&options).await?;
    let snapshots = SnapshotStore::new(&config.application.data_dir);
    let registry = HandlerRegistry::standard(warehouse.schema_layout);
    let writer = BatchWriter::from_config(warehouse, &args.scac());

    IngestDriver::new(&snapshots, &registry, &writer, &mut session)
        .run(&request)
        .await
}

/// Prints a failure and maps it to the process exit code
pub fn report_failure(error: &AlvysError) -> i32 {
    tracing::error!(error = %error, exit_code = error.exit_code(), "Command failed");
    eprintln!("❌ {error}");
    error.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(args: &[&str]) -> RunArgs {
        let mut argv = vec!["alvys-etl"];
        argv.extend_from_slice(args);
        Harness::parse_from(argv).run
    }

    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_defaults_select_all_entities() {
        let args = parse(&["--scac", " qwik "]);

        assert_eq!(args.entities().unwrap(), EntityKind::ALL.to_vec());
        assert_eq!(args.scac(), "QWIK");
        assert_eq!(args.ingest_windows(monday()).unwrap(), None);
        assert_eq!(
            args.export_windows(monday()).unwrap(),
            vec![DateWindow::last_week(monday()).unwrap()]
        );
    }

    #[test]
    fn test_entity_selection_is_canonical() {
        let args = parse(&["carriers", "trips", "--scac", "QWIK"]);
        assert_eq!(
            args.entities().unwrap(),
            vec![EntityKind::Trips, EntityKind::Carriers]
        );

        let bad = parse(&["pallets", "--scac", "QWIK"]);
        assert_eq!(bad.entities().unwrap_err().exit_code(), 2);
    }

    #[test]
    fn test_explicit_windows_override_weeks_ago() {
        let args = parse(&[
            "--scac",
            "QWIK",
            "--weeks-ago",
            "3",
            "--window",
            "2025-05-01..2025-05-07",
            "--window",
            "2025-05-08..2025-05-14",
        ]);

        let windows = args.export_windows(monday()).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].label(), "20250501-20250507");
        assert_eq!(args.ingest_windows(monday()).unwrap(), Some(windows));
    }

    #[test]
    fn test_weeks_ago_on_insert_selects_one_window() {
        let args = parse(&["--scac", "QWIK", "--weeks-ago", "2"]);
        assert_eq!(
            args.ingest_windows(monday()).unwrap(),
            Some(vec![DateWindow::week_range(monday(), 2).unwrap()])
        );
    }

    #[test]
    fn test_weeks_ago_beyond_date_range_is_rejected() {
        let args = parse(&["--scac", "QWIK", "--weeks-ago", "30000000"]);

        let err = args.export_windows(monday()).unwrap_err();
        assert!(matches!(err, AlvysError::Validation(_)));
        assert!(args.ingest_windows(monday()).is_err());
        assert!(args.describe_export(monday()).is_err());
    }

    #[test]
    fn test_dry_run_descriptions() {
        let args = parse(&["trips", "drivers", "--scac", "qwik", "--dry-run"]);

        assert_eq!(
            args.describe_export(monday()).unwrap(),
            "[DRY‑RUN] Would export: trips, drivers for QWIK range \
             2025-06-01T00:00:00.000Z → 2025-06-07T23:59:59.999Z"
        );
        assert_eq!(
            args.describe_insert().unwrap(),
            "[DRY‑RUN] Would insert: trips, drivers into schema QWIK"
        );
    }

    #[test]
    fn test_filter_override() {
        let args = parse(&["--scac", "QWIK", "--filter", "active-only"]);
        let config = crate::config::parse_config(
            r#"
[credentials]
source = "env"
"#,
        )
        .unwrap();

        let request = args.export_request(&config, monday()).unwrap();
        assert_eq!(request.filter, FilterVariant::ActiveOnly);
        assert_eq!(request.max_items, None);
    }
}
