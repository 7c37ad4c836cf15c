//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, attempt, scan)
//! - Categorization of `reqwest` failures
//! - Processing statistics tracking (errors and info metrics)
//!
//! Statistics are categorized into:
//! - **Errors**: Failed attempts and URLs that could not be fetched at all
//! - **Info**: Notable events (redirects, fallbacks, loop-guard terminations)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_attempt_error;
pub use stats::ProcessingStats;
pub use types::{
    AttemptError, AttemptKind, ErrorType, InfoType, InitializationError, ScanError,
};
