//! Request header values.
//!
//! Sent with every probe and fallback attempt alongside the configured
//! User-Agent, so the request looks like a browser navigation.

/// `Accept` header value of a modern Chrome navigation request
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
/// `Accept-Language` header value
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
