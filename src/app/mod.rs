//! Main application modules.
//!
//! This module provides input reading, URL normalization, progress logging,
//! shutdown handling, result output and statistics used by the batch run.

pub mod input;
pub mod logging;
pub mod output;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use input::{parse_input_lines, read_inputs};
pub use logging::log_progress;
pub use output::write_entry;
pub use shutdown::{cancel_on_signal, shutdown_gracefully};
pub use statistics::{print_error_statistics, BatchSummary};
pub use url::{normalize_url, NormalizedUrl};
