//! CLI command implementations

pub mod export;
pub mod export_insert;
pub mod insert;
pub mod run;
pub mod validate;
