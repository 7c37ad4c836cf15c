//! Sequential batch driver.
//!
//! Turns a list of raw inputs into a lazy stream of results, one per input and
//! in input order. URLs are resolved strictly one at a time: the next request
//! is not sent until the previous chain has been fully resolved.

use futures::future;
use futures::stream::{self, Stream, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::app::NormalizedUrl;
use crate::error_handling::{ErrorType, ScanError};
use crate::fetch::RedirectResolver;
use crate::models::ScanResult;

/// One row of a batch: the input as given, its normalized form, and the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    /// Zero-based position in the input list
    pub index: usize,
    pub input: String,
    /// Normalized URL, absent when the input could not be normalized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub result: ScanResult,
}

/// Scans `inputs` in order, yielding one [`BatchEntry`] per input.
///
/// The stream is lazy: nothing is fetched until it is polled, and each call
/// returns a fresh stream. Inputs that cannot be normalized and URLs whose
/// fetch failed produce a degraded row and the batch carries on. Nothing is
/// retried beyond the resolver's own probe/fallback pair.
///
/// When `cancel` fires the in-flight request is aborted and the stream ends
/// without a row for the interrupted input or any later one.
pub fn scan_batch(
    inputs: Vec<String>,
    resolver: RedirectResolver,
    cancel: CancellationToken,
) -> impl Stream<Item = BatchEntry> {
    stream::iter(inputs.into_iter().enumerate())
        .then(move |(index, input)| {
            let resolver = resolver.clone();
            let cancel = cancel.clone();
            async move { scan_entry(index, input, &resolver, &cancel).await }
        })
        .take_while(|entry| future::ready(entry.is_some()))
        .filter_map(future::ready)
}

/// Scans a single input. `None` means the batch was cancelled.
async fn scan_entry(
    index: usize,
    input: String,
    resolver: &RedirectResolver,
    cancel: &CancellationToken,
) -> Option<BatchEntry> {
    if cancel.is_cancelled() {
        return None;
    }

    let url = match NormalizedUrl::parse(&input) {
        Ok(url) => url,
        Err(e) => {
            resolver.stats().increment_error(ErrorType::InvalidInput);
            return Some(BatchEntry {
                index,
                input,
                url: None,
                result: ScanResult::degraded(e.to_string()),
            });
        }
    };

    let result = match resolver.resolve_with_cancel(&url, cancel).await {
        Ok(result) => result,
        Err(ScanError::Cancelled) => {
            debug!("Batch cancelled while scanning {url}");
            return None;
        }
        Err(e) => {
            warn!("Recording failure for {url}: {e}");
            ScanResult::degraded(e.to_string())
        }
    };

    Some(BatchEntry {
        index,
        input,
        url: Some(url.into_string()),
        result,
    })
}
