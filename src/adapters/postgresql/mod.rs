//! PostgreSQL warehouse integration

pub mod client;

pub use client::{redact_connection_string, ConnectOptions, PostgreSQLClient};
