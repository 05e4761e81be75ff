// Alvys ETL - Alvys API to PostgreSQL warehouse loader
// Copyright (c) 2025 Alvys ETL Contributors
// Licensed under the MIT License

//! # Alvys ETL
//!
//! Pulls trucking-operations records (trips, loads, invoices, drivers,
//! trucks, trailers, customers, carriers) from the multi-tenant Alvys REST
//! API, keeps them as dated JSON snapshots and bulk-loads sanitized rows
//! into a PostgreSQL warehouse.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Sanitizers, snapshot store, batch writer, pipeline drivers
//! - [`adapters`] - Alvys HTTP client, credential stores, PostgreSQL session
//! - [`domain`] - Entity kinds, windows, records, rows and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alvys_etl::adapters::alvys::AlvysClient;
//! use alvys_etl::adapters::credentials::{create_credential_store, CredentialCache};
//! use alvys_etl::config::load_config;
//! use alvys_etl::core::pipeline::{ExportDriver, ExportRequest};
//! use alvys_etl::core::snapshot::SnapshotStore;
//! use alvys_etl::domain::{AlvysError, DateWindow, EntityKind};
//!
//! # async fn example() -> alvys_etl::domain::Result<()> {
//! let config = load_config("alvys.toml")?;
//!
//! let store = create_credential_store(&config)?;
//! let mut cache = CredentialCache::new();
//! let credentials = cache.resolve(store.as_ref(), "QWIK").await?;
//!
//! let client = AlvysClient::new(&config.api)?;
//! let snapshots = SnapshotStore::new(&config.application.data_dir);
//! let window = DateWindow::last_week(chrono::Utc::now()).map_err(AlvysError::Validation)?;
//! let request = ExportRequest {
//!     entities: vec![EntityKind::Trips],
//!     windows: vec![window],
//!     filter: config.export.filter_variant,
//!     max_items: None,
//! };
//!
//! let summary = ExportDriver::new(&client, &snapshots, credentials, config.api.page_size)
//!     .run(&request)
//!     .await?;
//! println!("Fetched {} records", summary.total_records());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`]; malformed record
//! fields never fail, they sanitize to null.
//!
//! ```rust,no_run
//! use alvys_etl::domain::AlvysError;
//!
//! fn example() -> Result<(), AlvysError> {
//!     let config = alvys_etl::config::load_config("alvys.toml")?;
//!     println!("{}", config.api.page_size);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
