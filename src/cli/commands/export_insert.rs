//! `export-insert` command: both halves back to back
//!
//! The insert half loads exactly the windows the export half just wrote.

use super::run::{report_failure, resolve_credentials, run_export, run_insert, RunArgs};
use crate::config::load_config;
use chrono::Utc;
use clap::Args;

/// Arguments for the export-insert command
#[derive(Args, Debug)]
pub struct ExportInsertArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

impl ExportInsertArgs {
    /// Execute the export-insert command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let now = Utc::now();

        if self.run.dry_run {
            let lines = self
                .run
                .describe_export(now)
                .and_then(|export| Ok((export, self.run.describe_insert()?)));
            match lines {
                Ok((export, insert)) => {
                    println!("{export}");
                    println!("{insert}");
                }
                Err(e) => return Ok(report_failure(&e)),
            }
            return Ok(0);
        }

        tracing::info!(scac = %self.run.scac(), "Starting export-insert command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure(&e)),
        };

        let credentials = match resolve_credentials(&config, &self.run.scac()).await {
            Ok(c) => c,
            Err(e) => return Ok(report_failure(&e)),
        };

        let exported = match run_export(&config, &self.run, credentials, now).await {
            Ok(summary) => summary,
            Err(e) => return Ok(report_failure(&e)),
        };
        print!("{}", exported.render());

        let mut insert_args = self.run.clone();
        insert_args.windows = match self.run.export_windows(now) {
            Ok(windows) => windows,
            Err(e) => return Ok(report_failure(&e)),
        };

        match run_insert(&config, &insert_args, now).await {
            Ok(summary) => {
                print!("{}", summary.render());
                Ok(0)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
