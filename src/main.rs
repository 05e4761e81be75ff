// Alvys ETL - Alvys API to PostgreSQL warehouse loader
// Copyright (c) 2025 Alvys ETL Contributors
// Licensed under the MIT License

use alvys_etl::cli::Cli;
use alvys_etl::config::load_config;
use alvys_etl::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Optional; a missing .env is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging and the default level come from the config file when it
    // loads; the command itself reports a broken config
    let file_config = if cli.is_dry_run() {
        None
    } else {
        load_config(&cli.config).ok()
    };
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config.map(|c| c.logging).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Alvys ETL - Alvys API to PostgreSQL warehouse loader"
    );

    let exit_code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}
