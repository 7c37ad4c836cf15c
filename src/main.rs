//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_checker` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Choosing between a batch run and the HTTP API
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use redirect_checker::initialization::init_logger_with;
use redirect_checker::{run_scan, run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Some(port) = config.serve_port {
        if let Err(e) = run_server(config, port).await {
            eprintln!("redirect_checker error: {:#}", e);
            process::exit(1);
        }
        return Ok(());
    }

    match run_scan(config).await {
        Ok(report) => {
            if report.cancelled {
                eprintln!(
                    "Interrupted after {} of {} URLs",
                    report.summary.scanned, report.total_urls
                );
                process::exit(130);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("redirect_checker error: {:#}", e);
            process::exit(1);
        }
    }
}
