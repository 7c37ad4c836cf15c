//! URL validation and normalization utilities.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::config::{DEFAULT_SCHEME, MAX_URL_LENGTH, URL_SCHEME_PATTERN};
use crate::error_handling::ScanError;

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(URL_SCHEME_PATTERN).unwrap_or_else(|e| panic!("invalid scheme pattern: {e}"))
});

/// A scan request that has been trimmed, given an explicit scheme, and parsed
/// successfully once.
///
/// The string keeps the user's spelling (no trailing slash is added), since it
/// is what the first hop reports as its `url`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Normalizes and validates a raw scan request.
    ///
    /// Adds the `http://` prefix when neither `http://` nor `https://` is present
    /// (case-insensitive), then checks the result parses as a URL with a host.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidInput` for empty input, input longer than
    /// `MAX_URL_LENGTH`, or input that does not parse as a URL.
    pub fn parse(input: &str) -> Result<Self, ScanError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ScanError::InvalidInput("empty URL".to_string()));
        }

        let normalized = normalize_url(trimmed);

        // Checked after normalization, the prefix can push it over the limit
        if normalized.len() > MAX_URL_LENGTH {
            warn!(
                "Rejecting URL exceeding maximum length ({} > {}): {}...",
                normalized.len(),
                MAX_URL_LENGTH,
                normalized.chars().take(50).collect::<String>()
            );
            return Err(ScanError::InvalidInput(format!(
                "URL exceeds {MAX_URL_LENGTH} characters"
            )));
        }

        match url::Url::parse(&normalized) {
            Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
                Ok(NormalizedUrl(normalized))
            }
            Ok(_) => {
                warn!("Rejecting URL without host: {trimmed}");
                Err(ScanError::InvalidInput(format!("no host in {trimmed}")))
            }
            Err(e) => {
                warn!("Rejecting invalid URL: {trimmed} ({e})");
                Err(ScanError::InvalidInput(format!("{trimmed}: {e}")))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prefixes `http://` when the input carries no http(s) scheme. Does not validate.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || SCHEME_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    }
}
