//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs progress information about URL processing.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed_urls` - Atomic counter of completed URLs
/// * `total_urls` - Number of URLs in the batch
pub fn log_progress(
    start_time: std::time::Instant,
    completed_urls: &Arc<AtomicUsize>,
    total_urls: usize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed_urls.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Scanned {}/{} URLs in {:.2} seconds (~{:.2} URLs/sec)",
        completed, total_urls, elapsed_secs, rate
    );
}
