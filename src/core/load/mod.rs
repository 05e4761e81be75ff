//! Bulk loading of sanitized rows
//!
//! [`BatchWriter`] splits a table's rows into chunks, builds one
//! parameterized [`InsertStatement`] per chunk and runs them inside a single
//! transaction on a [`WarehouseSession`].

pub mod session;
pub mod statement;
pub mod writer;

pub use session::WarehouseSession;
pub use statement::{qualified_table, quote_ident, InsertStatement, INSERTED_DTTM};
pub use writer::{BatchWriter, WriteReport, DEFAULT_CHUNK_SIZE};
