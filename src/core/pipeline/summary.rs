//! Run summary and reporting

use super::stage::EntityStage;
use crate::core::load::WriteReport;
use crate::domain::EntityKind;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

/// What happened to one entity
#[derive(Debug, Clone)]
pub struct EntitySummary {
    pub entity: EntityKind,
    pub stage: EntityStage,
    /// Windows fetched or loaded; `0` for non-partitioned entities
    pub windows: usize,
    /// Raw records fetched from the API or read from snapshots
    pub records: usize,
    pub snapshot_files: Vec<PathBuf>,
    pub tables: Vec<WriteReport>,
    pub duration: Duration,
}

impl EntitySummary {
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            stage: EntityStage::Pending,
            windows: 0,
            records: 0,
            snapshot_files: Vec::new(),
            tables: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn rows_written(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Summary of one command
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// `export` or `insert`
    pub mode: &'static str,
    pub entities: Vec<EntitySummary>,
    pub duration: Duration,
}

impl RunSummary {
    pub fn new(mode: &'static str) -> Self {
        Self {
            mode,
            entities: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn total_records(&self) -> usize {
        self.entities.iter().map(|e| e.records).sum()
    }

    pub fn total_rows(&self) -> usize {
        self.entities.iter().map(|e| e.rows_written()).sum()
    }

    /// Human-readable report printed at the end of a command
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n📊 {} summary", self.mode);

        for entity in &self.entities {
            let _ = write!(
                out,
                "  {:<10} {:>8} records",
                entity.entity.as_str(),
                entity.records
            );
            if entity.windows > 0 {
                let _ = write!(out, " in {} window(s)", entity.windows);
            }
            if !entity.snapshot_files.is_empty() {
                let _ = write!(out, ", {} file(s)", entity.snapshot_files.len());
            }
            for table in &entity.tables {
                let _ = write!(out, ", {} → {} rows", table.table, table.rows);
            }
            let _ = writeln!(out, " ({:.2}s)", entity.duration.as_secs_f64());
        }

        let _ = writeln!(
            out,
            "  total: {} records, {} rows written in {:.2}s",
            self.total_records(),
            self.total_rows(),
            self.duration.as_secs_f64()
        );
        out
    }

    pub fn log_summary(&self) {
        for entity in &self.entities {
            tracing::info!(
                mode = self.mode,
                entity = %entity.entity,
                stage = %entity.stage,
                windows = entity.windows,
                records = entity.records,
                snapshot_files = entity.snapshot_files.len(),
                rows_written = entity.rows_written(),
                duration_ms = entity.duration.as_millis() as u64,
                "Entity completed"
            );
        }
        tracing::info!(
            mode = self.mode,
            entities = self.entities.len(),
            records = self.total_records(),
            rows_written = self.total_rows(),
            duration_ms = self.duration.as_millis() as u64,
            "Run completed"
        );
    }
}
