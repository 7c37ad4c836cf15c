//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, limits, and the placeholders used on the wire.

use std::time::Duration;

/// Progress logging interval in seconds while a batch is running
pub const LOGGING_INTERVAL: u64 = 5;

// Redirect handling
/// Maximum number of probe iterations per URL.
/// Bounds the hop list and guarantees resolution terminates.
pub const MAX_REDIRECT_HOPS: usize = 10;

// Attempt deadlines
/// Deadline for the header-only probe (HEAD, redirects not followed)
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(3000);
/// Deadline for the full fallback request (GET, redirects followed)
pub const FALLBACK_TIMEOUT: Duration = Duration::from_millis(5000);
/// Redirect limit applied by the client on the fallback path
pub const FALLBACK_MAX_REDIRECTS: usize = 20;

/// Default User-Agent string for HTTP requests.
///
/// Mimics a desktop Chrome browser on Windows; plenty of sites answer a bare
/// `reqwest/x.y` agent with a 403 or a bot challenge instead of their real redirect.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// URL normalization
/// Scheme prefixed onto inputs that carry neither `http://` nor `https://`
pub const DEFAULT_SCHEME: &str = "http://";
/// Inputs already carrying one of these schemes are left untouched (case-insensitive)
pub const URL_SCHEME_PATTERN: &str = r"(?i)^https?://";
/// Maximum URL length (2048 characters), matching common browser and server limits
pub const MAX_URL_LENGTH: usize = 2048;

// Wire placeholders
/// Status placeholder when no response was ever obtained
pub const NO_RESPONSE_PLACEHOLDER: &str = "—";
/// Status placeholder for degraded batch rows
pub const ERROR_STATUS_PLACEHOLDER: &str = "error";
/// Error body returned by the API for a missing or malformed scan request
pub const INVALID_URL_MESSAGE: &str = "Missing or invalid URL";
