// Shared test helpers for building resolvers against local mock servers.

use std::sync::Arc;

use redirect_checker::{Config, NormalizedUrl, ProcessingStats, RedirectResolver};

/// Config with short deadlines so failure paths finish quickly.
#[allow(dead_code)] // Used by other test files
pub fn fast_config() -> Config {
    Config {
        probe_timeout_ms: 500,
        fallback_timeout_ms: 1000,
        ..Default::default()
    }
}

/// Resolver built from `config` with a fresh statistics tracker.
#[allow(dead_code)] // Used by other test files
pub fn resolver_from(config: &Config) -> (RedirectResolver, Arc<ProcessingStats>) {
    let stats = Arc::new(ProcessingStats::new());
    let resolver = RedirectResolver::from_config(config, Arc::clone(&stats))
        .expect("Failed to build resolver");
    (resolver, stats)
}

/// Resolver with default hop budget and short deadlines.
#[allow(dead_code)] // Used by other test files
pub fn test_resolver() -> (RedirectResolver, Arc<ProcessingStats>) {
    resolver_from(&fast_config())
}

#[allow(dead_code)] // Used by other test files
pub fn url(raw: impl AsRef<str>) -> NormalizedUrl {
    NormalizedUrl::parse(raw.as_ref()).expect("test URL should be valid")
}

/// A local address nothing listens on.
#[allow(dead_code)] // Used by other test files
pub const UNREACHABLE: &str = "http://127.0.0.1:1/";
