//! A single HTTP attempt for one hop.
//!
//! Each hop is tried at most twice, and the two tries differ in more than a
//! retry count:
//!
//! | attempt  | method | redirects          | deadline |
//! |----------|--------|--------------------|----------|
//! | probe    | HEAD   | returned, not followed | ~3 s |
//! | fallback | GET    | followed by client | ~5 s     |
//!
//! The deadline and cancellation token are passed in explicitly. Whichever
//! fires first aborts the in-flight request by dropping its future.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::error_handling::{AttemptError, AttemptKind};
use crate::fetch::request::{collect_headers, extract_location, RequestHeaders};

impl AttemptKind {
    fn method(&self) -> Method {
        match self {
            AttemptKind::Probe => Method::HEAD,
            AttemptKind::Fallback => Method::GET,
        }
    }
}

/// What the resolver needs from a response; the body is never read.
#[derive(Debug, Clone)]
pub(crate) struct AttemptResponse {
    pub status: StatusCode,
    /// URL the client reports for the response (the last one it followed)
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub location: Option<String>,
}

impl AttemptResponse {
    fn from_response(response: &reqwest::Response) -> Self {
        AttemptResponse {
            status: response.status(),
            url: response.url().to_string(),
            headers: collect_headers(response.headers()),
            location: extract_location(response.headers()),
        }
    }
}

/// Sends one request to `url` and waits for its response head.
///
/// # Errors
///
/// - `AttemptError::Timeout` if `deadline` elapses first
/// - `AttemptError::Cancelled` if `cancel` fires first
/// - `AttemptError::Request` for DNS, connect, TLS or protocol failures
pub(crate) async fn execute(
    client: &reqwest::Client,
    kind: AttemptKind,
    url: &str,
    deadline: Duration,
    cancel: &CancellationToken,
) -> Result<AttemptResponse, AttemptError> {
    let request = RequestHeaders::apply_to_request_builder(client.request(kind.method(), url));

    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(AttemptError::Cancelled),
        result = tokio::time::timeout(deadline, request.send()) => match result {
            Ok(response) => response?,
            Err(_) => return Err(AttemptError::Timeout { kind, after: deadline }),
        },
    };

    Ok(AttemptResponse::from_response(&response))
}
