//! Pipeline drivers
//!
//! - [`ExportDriver`] - search API → [`SnapshotStore`](crate::core::snapshot::SnapshotStore)
//! - [`IngestDriver`] - snapshots → sanitizers → [`BatchWriter`](crate::core::load::BatchWriter)
//!
//! The two modes share no state other than the snapshot directory, so an
//! `insert` can be rerun from the files an earlier `export` left behind.
//! Each entity moves through the [`EntityStage`] machine; the first failure
//! ends the run.

pub mod export;
pub mod handlers;
pub mod ingest;
pub mod stage;
pub mod summary;

pub use export::{ExportDriver, ExportRequest};
pub use handlers::{HandlerRegistry, IngestHandler, SingleTableHandler, TableBatch, TripHandler};
pub use ingest::{IngestDriver, IngestRequest};
pub use stage::{EntityRun, EntityStage};
pub use summary::{EntitySummary, RunSummary};
