//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for alvys-etl using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Alvys ETL - Alvys API to PostgreSQL warehouse
#[derive(Parser, Debug)]
#[command(name = "alvys-etl")]
#[command(version, about, long_about = None)]
#[command(author = "Alvys ETL Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "alvys.toml", env = "ALVYS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ALVYS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch entities from the Alvys API into snapshot files
    Export(commands::export::ExportArgs),

    /// Load snapshot files into the warehouse
    Insert(commands::insert::InsertArgs),

    /// Export, then insert the windows just exported
    ExportInsert(commands::export_insert::ExportInsertArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Cli {
    pub fn is_dry_run(&self) -> bool {
        match &self.command {
            Commands::Export(args) => args.run.dry_run,
            Commands::Insert(args) => args.run.dry_run,
            Commands::ExportInsert(args) => args.run.dry_run,
            Commands::ValidateConfig(_) => false,
        }
    }

    /// Runs the selected command and returns the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Export(args) => args.execute(&self.config).await,
            Commands::Insert(args) => args.execute(&self.config).await,
            Commands::ExportInsert(args) => args.execute(&self.config).await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
        }
    }
}
