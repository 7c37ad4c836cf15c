//! redirect_checker library: bulk HTTP redirect resolution
//!
//! This library resolves URLs through their HTTP redirect chains and reports,
//! for each URL, the final status, the final destination, the status of the
//! first response, a coarse classification, the final response headers and
//! every redirect hop observed along the way.
//!
//! # Example
//!
//! ```no_run
//! use redirect_checker::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("urls.txt"),
//!     max_hops: 5,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!("Scanned {} URLs: {} ok, {} errors",
//!          report.summary.scanned, report.summary.ok, report.summary.errors);
//! # Ok(())
//! # }
//! ```
//!
//! Single URLs can be resolved directly:
//!
//! ```no_run
//! use std::sync::Arc;
//! use redirect_checker::{Config, NormalizedUrl, ProcessingStats, RedirectResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = RedirectResolver::from_config(&Config::default(), Arc::new(ProcessingStats::new()))?;
//! let result = resolver.resolve(&NormalizedUrl::parse("example.com")?).await?;
//! println!("{} -> {} ({})", result.initial_status, result.destination, result.classification);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
mod batch;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod models;
pub mod scan_server;

// Re-export public API
pub use app::{normalize_url, parse_input_lines, BatchSummary, NormalizedUrl};
pub use batch::{scan_batch, BatchEntry};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{ErrorType, InfoType, InitializationError, ProcessingStats, ScanError};
pub use fetch::{resolve_location, RedirectResolver, ResolverSettings};
pub use models::{Classification, Hop, ScanResult, ScanStatus, Termination};
pub use run::{run_scan, run_scan_with_writer, run_server, ScanReport};

// Internal run module (drives a batch or the HTTP API from a `Config`)
mod run {
    use anyhow::{Context, Result};
    use std::io::{IsTerminal, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use futures::StreamExt;
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        cancel_on_signal, log_progress, print_error_statistics, read_inputs, shutdown_gracefully,
        write_entry, BatchSummary,
    };
    use crate::batch::scan_batch;
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::error_handling::ProcessingStats;
    use crate::fetch::RedirectResolver;
    use crate::scan_server::{start_scan_server, ScanState};

    /// Results of a batch run.
    #[derive(Debug, Clone)]
    pub struct ScanReport {
        /// Number of URLs read from the input
        pub total_urls: usize,
        /// Counts over the rows that were written
        pub summary: BatchSummary,
        /// True when the run was interrupted before every URL was scanned
        pub cancelled: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a batch scan with the provided configuration, writing rows to stdout.
    ///
    /// Reads URLs from `config.file` (or stdin for `-`), resolves them one at a
    /// time and writes each row as soon as it is available. Ctrl-C aborts the
    /// in-flight request and skips the remaining URLs.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be opened or read
    /// - The HTTP clients cannot be initialized
    /// - Writing a row to stdout fails
    pub async fn run_scan(config: Config) -> Result<ScanReport> {
        let cancel = CancellationToken::new();
        let ctrl_c = tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), cancel.clone()));

        let stdout = std::io::stdout();
        let color = stdout.is_terminal();
        let report = run_batch(config, stdout, color, cancel).await;
        ctrl_c.abort();
        report
    }

    /// Like [`run_scan`], but rows go to `writer` uncolored and cancellation is
    /// driven by the caller through `cancel`.
    pub async fn run_scan_with_writer<W: Write>(
        config: Config,
        writer: W,
        cancel: CancellationToken,
    ) -> Result<ScanReport> {
        run_batch(config, writer, false, cancel).await
    }

    async fn run_batch<W: Write>(
        config: Config,
        mut writer: W,
        color: bool,
        cancel: CancellationToken,
    ) -> Result<ScanReport> {
        let inputs = read_inputs(&config.file).await?;
        let total_urls = inputs.len();

        let error_stats = Arc::new(ProcessingStats::new());
        let resolver = RedirectResolver::from_config(&config, Arc::clone(&error_stats))
            .context("Failed to initialize HTTP clients")?;

        let start_time = std::time::Instant::now();
        let completed_urls = Arc::new(AtomicUsize::new(0));

        let cancel_logging = CancellationToken::new();
        let logging_task = {
            let cancel_logging = cancel_logging.clone();
            let completed_urls = Arc::clone(&completed_urls);
            Some(tokio::task::spawn(async move {
                let mut interval =
                    tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL));
                // The first tick completes immediately
                interval.tick().await;
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            log_progress(start_time, &completed_urls, total_urls);
                        }
                        _ = cancel_logging.cancelled() => {
                            break;
                        }
                    }
                }
            }))
        };

        let mut summary = BatchSummary::default();
        let entries = scan_batch(inputs, resolver, cancel.clone());
        futures::pin_mut!(entries);

        let mut write_result = Ok(());
        while let Some(entry) = entries.next().await {
            summary.record(&entry.result);
            completed_urls.fetch_add(1, Ordering::SeqCst);
            write_result = write_entry(&mut writer, &entry, config.output, color)
                .and_then(|()| writer.flush())
                .context("Failed to write scan result");
            if write_result.is_err() {
                break;
            }
        }

        shutdown_gracefully(cancel_logging, logging_task).await;
        write_result?;

        let cancelled = cancel.is_cancelled() && summary.scanned < total_urls;
        if cancelled {
            warn!(
                "Scan cancelled: {} of {} URLs skipped",
                total_urls - summary.scanned,
                total_urls
            );
        }

        log_progress(start_time, &completed_urls, total_urls);
        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        summary.log(elapsed_seconds);
        print_error_statistics(&error_stats);

        Ok(ScanReport {
            total_urls,
            summary,
            cancelled,
            elapsed_seconds,
        })
    }

    /// Serves the HTTP API on `port` until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be initialized or the port
    /// cannot be bound.
    pub async fn run_server(config: Config, port: u16) -> Result<()> {
        let error_stats = Arc::new(ProcessingStats::new());
        let resolver = RedirectResolver::from_config(&config, Arc::clone(&error_stats))
            .context("Failed to initialize HTTP clients")?;

        info!(
            "Resolving with up to {} hops (probe {:?}, fallback {:?})",
            resolver.settings().max_hops,
            resolver.settings().probe_timeout,
            resolver.settings().fallback_timeout
        );

        start_scan_server(port, ScanState::new(resolver)).await?;
        print_error_statistics(&error_stats);
        Ok(())
    }
}
