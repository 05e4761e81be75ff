//! Domain models and types for the Alvys pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity kinds** ([`EntityKind`]) in canonical processing order
//! - **Date windows** ([`DateWindow`]) that partition search queries
//! - **Raw records** ([`RawRecord`]) and the run identifier ([`FileId`])
//! - **Typed rows** ([`SanitizedRow`], [`SqlValue`], [`TableSpec`])
//! - **Error types** ([`AlvysError`], [`ApiError`], [`WarehouseError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AlvysError>`]:
//!
//! ```rust,no_run
//! use alvys_etl::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = alvys_etl::config::load_config("alvys.toml")?;
//!     println!("{}", config.application.data_dir);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod errors;
pub mod record;
pub mod result;
pub mod row;
pub mod window;

// Re-export commonly used types for convenience
pub use entity::EntityKind;
pub use errors::{AlvysError, ApiError, WarehouseError};
pub use record::{lookup, tag_records, FileId, RawRecord, FILE_ID_KEY};
pub use result::Result;
pub use row::{Column, ColumnKind, SanitizedRow, SqlValue, TableSpec};
pub use window::DateWindow;
