//! `insert` command: snapshot files to warehouse tables

use super::run::{report_failure, run_insert, RunArgs};
use crate::config::load_config;
use chrono::Utc;
use clap::Args;

/// Arguments for the insert command
#[derive(Args, Debug)]
pub struct InsertArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

impl InsertArgs {
    /// Execute the insert command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        if self.run.dry_run {
            match self.run.describe_insert() {
                Ok(line) => println!("{line}"),
                Err(e) => return Ok(report_failure(&e)),
            }
            return Ok(0);
        }

        tracing::info!(scac = %self.run.scac(), "Starting insert command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure(&e)),
        };

        match run_insert(&config, &self.run, Utc::now()).await {
            Ok(summary) => {
                print!("{}", summary.render());
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
