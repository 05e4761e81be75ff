//! Warehouse session abstraction

use super::statement::InsertStatement;
use crate::domain::Result;
use async_trait::async_trait;

/// One open connection to the warehouse
///
/// The writer drives a session through `begin`, one `insert` per chunk,
/// and `commit`. On failure it calls `rollback` before giving up.
#[async_trait]
pub trait WarehouseSession: Send {
    async fn begin(&mut self) -> Result<()>;

    /// Executes a multi-row insert, returning the number of rows inserted
    async fn insert(&mut self, statement: &InsertStatement) -> Result<u64>;

    async fn commit(&mut self) -> Result<()>;

    async fn rollback(&mut self) -> Result<()>;

    /// Short description for logs; must not expose credentials
    fn describe(&self) -> String;
}
