//! Error type definitions.
//!
//! This module defines all error and info types used throughout the application.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Which of the two requests made for one hop failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptKind {
    /// Header-only request, redirects handled by hand
    Probe,
    /// Full request, redirects followed by the client
    Fallback,
}

impl AttemptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptKind::Probe => "probe",
            AttemptKind::Fallback => "fallback",
        }
    }
}

/// Failure of a single HTTP attempt.
///
/// Never escapes the resolver: a probe failure triggers the fallback, and a
/// fallback failure is turned into [`ScanError::Fetch`].
#[derive(Error, Debug)]
pub enum AttemptError {
    /// The attempt's deadline elapsed before a response arrived.
    #[error("{} request timed out after {}ms", kind.as_str(), after.as_millis())]
    Timeout { kind: AttemptKind, after: Duration },

    /// DNS, connect, TLS or protocol failure reported by the client.
    #[error("{}", error_chain_message(.0))]
    Request(#[from] ReqwestError),

    /// The surrounding scan was cancelled while the attempt was in flight.
    #[error("request cancelled")]
    Cancelled,
}

/// Errors surfaced by a scan of one URL.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan request was missing, empty or not a URL. No request was made.
    #[error("Missing or invalid URL: {0}")]
    InvalidInput(String),

    /// Both the probe and the fallback failed for this URL.
    #[error("{message}")]
    Fetch { url: String, message: String },

    /// The scan was cancelled before it completed.
    #[error("scan cancelled")]
    Cancelled,
}

/// Renders an error and its sources as `outer: inner: root`.
///
/// `reqwest::Error`'s own message is usually just "error sending request for url",
/// the useful part (connection refused, dns error, ...) lives in its sources.
pub fn error_chain_message(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Types of errors that can occur during URL resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Attempt-level failures
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestTimeoutError,
    HttpRequestRequestError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    // URL-level failures
    FetchFailure,
    InvalidInput,
}

/// Types of informational metrics that can occur during URL resolution.
///
/// Info metrics track notable events that aren't errors, such as redirects
/// or loop-guard terminations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    HttpRedirect,      // At least one redirect hop recorded
    HttpsRedirect,     // A hop went from http:// to https://
    MultipleRedirects, // More than one hop in the chain
    ProbeFallback,     // HEAD failed, GET answered
    SelfRedirect,      // Location resolved to the URL just requested
    HopLimit,          // Hop budget exhausted while still redirecting
    MissingLocation,   // 3xx without a Location header
    InvalidLocation,   // 3xx whose Location does not resolve to a URL
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::FetchFailure => "Fetch failure (probe and fallback failed)",
            ErrorType::InvalidInput => "Invalid input",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::HttpsRedirect => "HTTP to HTTPS redirect",
            InfoType::MultipleRedirects => "Multiple redirects",
            InfoType::ProbeFallback => "Probe fell back to GET",
            InfoType::SelfRedirect => "Self redirect (loop guard)",
            InfoType::HopLimit => "Hop limit reached",
            InfoType::MissingLocation => "Redirect without Location",
            InfoType::InvalidLocation => "Redirect with unparsable Location",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty());
            assert!(seen.insert(error_type.as_str()), "{error_type:?} duplicated");
        }
    }

    #[test]
    fn test_info_type_as_str_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for info_type in InfoType::iter() {
            assert!(seen.insert(info_type.as_str()), "{info_type:?} duplicated");
        }
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(
            ErrorType::FetchFailure.to_string(),
            "Fetch failure (probe and fallback failed)"
        );
    }

    #[test]
    fn test_scan_error_fetch_displays_message_only() {
        let err = ScanError::Fetch {
            url: "http://example.invalid".to_string(),
            message: "dns error: failed to lookup address".to_string(),
        };
        assert_eq!(err.to_string(), "dns error: failed to lookup address");
    }

    #[test]
    fn test_scan_error_invalid_input_message() {
        let err = ScanError::InvalidInput("empty".to_string());
        assert_eq!(err.to_string(), "Missing or invalid URL: empty");
    }

    #[test]
    fn test_attempt_timeout_message() {
        let err = AttemptError::Timeout {
            kind: AttemptKind::Probe,
            after: Duration::from_millis(3000),
        };
        assert_eq!(err.to_string(), "probe request timed out after 3000ms");
    }

    #[derive(Debug)]
    struct Leaf;
    impl std::fmt::Display for Leaf {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("connection refused")
        }
    }
    impl std::error::Error for Leaf {}

    #[derive(Debug)]
    struct Outer(Leaf);
    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("error sending request")
        }
    }
    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_message_includes_sources() {
        let err = Outer(Leaf);
        assert_eq!(
            error_chain_message(&err),
            "error sending request: connection refused"
        );
    }
}
