//! Scan server data structures.

use serde::Serialize;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Instant;

use crate::error_handling::ProcessingStats;
use crate::fetch::RedirectResolver;

/// Shared state for the scan server
#[derive(Clone)]
pub struct ScanState {
    pub resolver: RedirectResolver,
    /// Scans that returned a result
    pub scans_served: Arc<AtomicUsize>,
    /// Scans rejected as invalid input
    pub scans_rejected: Arc<AtomicUsize>,
    /// Scans where neither the probe nor the fallback got a response
    pub scans_failed: Arc<AtomicUsize>,
    pub start_time: Arc<Instant>,
}

impl ScanState {
    pub fn new(resolver: RedirectResolver) -> Self {
        ScanState {
            resolver,
            scans_served: Arc::new(AtomicUsize::new(0)),
            scans_rejected: Arc::new(AtomicUsize::new(0)),
            scans_failed: Arc::new(AtomicUsize::new(0)),
            start_time: Arc::new(Instant::now()),
        }
    }

    pub fn error_stats(&self) -> &Arc<ProcessingStats> {
        self.resolver.stats()
    }
}

/// JSON response for `/status` endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub scans_served: usize,
    pub scans_rejected: usize,
    pub scans_failed: usize,
    pub uptime_seconds: f64,
    pub errors: ErrorCounts,
    pub info: InfoCounts,
}

#[derive(Debug, Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub timeout: usize,
    pub connection_error: usize,
    pub fetch_failure: usize,
    pub invalid_input: usize,
    pub other_error: usize,
}

#[derive(Debug, Serialize)]
pub struct InfoCounts {
    pub total: usize,
    pub http_redirect: usize,
    pub https_redirect: usize,
    pub multiple_redirects: usize,
    pub probe_fallback: usize,
    pub self_redirect: usize,
    pub hop_limit: usize,
    pub missing_location: usize,
    pub invalid_location: usize,
}
