//! `export` command: search API to snapshot files

use super::run::{report_failure, resolve_credentials, run_export, RunArgs};
use crate::config::load_config;
use chrono::Utc;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let now = Utc::now();

        if self.run.dry_run {
            match self.run.describe_export(now) {
                Ok(line) => println!("{line}"),
                Err(e) => return Ok(report_failure(&e)),
            }
            return Ok(0);
        }

        tracing::info!(scac = %self.run.scac(), "Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure(&e)),
        };

        let credentials = match resolve_credentials(&config, &self.run.scac()).await {
            Ok(c) => c,
            Err(e) => return Ok(report_failure(&e)),
        };

        match run_export(&config, &self.run, credentials, now).await {
            Ok(summary) => {
                print!("{}", summary.render());
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
