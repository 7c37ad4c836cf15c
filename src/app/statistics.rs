//! Batch summary and statistics printing.

use log::info;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::models::ScanResult;

/// Counts accumulated over one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub scanned: usize,
    /// Final status 2xx
    pub ok: usize,
    /// Final status 4xx, 5xx, or a row that could not be scanned
    pub errors: usize,
    /// At least one redirect hop recorded
    pub redirected: usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &ScanResult) {
        self.scanned += 1;
        if result.status.is_success() {
            self.ok += 1;
        }
        if result.status.is_failure() {
            self.errors += 1;
        }
        if !result.hops.is_empty() {
            self.redirected += 1;
        }
    }

    /// Logs the one-line summary shown at the end of a batch.
    pub fn log(&self, elapsed_seconds: f64) {
        info!(
            "Scanned {} URL{} ({} ok, {} errors, {} redirected) in {:.1}s",
            self.scanned,
            if self.scanned == 1 { "" } else { "s" },
            self.ok,
            self.errors,
            self.redirected,
            elapsed_seconds
        );
    }
}

/// Prints error and info statistics to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
