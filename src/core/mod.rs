//! Core pipeline logic.
//!
//! # Modules
//!
//! - [`sanitize`] - Raw record to typed row mapping, one flattener per entity
//! - [`snapshot`] - Dated JSON snapshot files
//! - [`load`] - Chunked, transactional warehouse inserts
//! - [`pipeline`] - Export and ingest drivers, run state and summary
//!
//! # Workflow
//!
//! 1. **Fetch**: page through a search endpoint per entity and window
//! 2. **Snapshot**: tag records with a `FILE_ID` and write them to disk
//! 3. **Sanitize**: read snapshots back and flatten them into rows
//! 4. **Load**: insert rows in chunks with a shared `INSERTED_DTTM`
//!
//! # Example
//!
//! ```rust,no_run
//! use alvys_etl::config::SchemaLayout;
//! use alvys_etl::core::load::{BatchWriter, WarehouseSession};
//! use alvys_etl::core::pipeline::{HandlerRegistry, IngestDriver, IngestRequest};
//! use alvys_etl::core::snapshot::SnapshotStore;
//! use alvys_etl::domain::EntityKind;
//!
//! # async fn example(session: &mut dyn WarehouseSession) -> alvys_etl::domain::Result<()> {
//! let store = SnapshotStore::new("alvys_weekly_data");
//! let registry = HandlerRegistry::standard(SchemaLayout::Standard);
//! let writer = BatchWriter::new("QWIK", "", 500);
//!
//! let summary = IngestDriver::new(&store, &registry, &writer, session)
//!     .run(&IngestRequest {
//!         entities: EntityKind::ALL.to_vec(),
//!         windows: None,
//!     })
//!     .await?;
//!
//! print!("{}", summary.render());
//! # Ok(())
//! # }
//! ```

pub mod load;
pub mod pipeline;
pub mod sanitize;
pub mod snapshot;
