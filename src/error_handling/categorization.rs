//! Error categorization.
//!
//! Maps attempt failures onto the [`ErrorType`] counters.

use super::types::{AttemptError, ErrorType};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Redirects are never followed on the probe path and statuses are never turned
/// into errors, so only transport-level kinds are expected here.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes an [`AttemptError`]. Returns `None` for cancellations, which are not failures.
pub fn categorize_attempt_error(error: &AttemptError) -> Option<ErrorType> {
    match error {
        AttemptError::Timeout { .. } => Some(ErrorType::HttpRequestTimeoutError),
        AttemptError::Request(e) => Some(categorize_reqwest_error(e)),
        AttemptError::Cancelled => None,
    }
}
