//! HTTP request building and header extraction.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, ACCEPT, ACCEPT_LANGUAGE, LOCATION};

use crate::config::{BROWSER_ACCEPT, BROWSER_ACCEPT_LANGUAGE};

/// Browser request headers sent with every attempt.
///
/// The User-Agent itself is set on the client; these complete the picture so a
/// HEAD probe looks like a navigation rather than a script.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(ACCEPT, BROWSER_ACCEPT)
            .header(ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
    }
}

/// Collects every response header into a name → value map.
///
/// Names are kept as received from the client (lowercase for `reqwest`).
/// Repeated headers are joined with `", "`; non-UTF-8 bytes are replaced.
pub(crate) fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}

/// Raw `Location` header value. An empty header counts as missing.
pub(crate) fn extract_location(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LOCATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
        .filter(|location| !location.is_empty())
}
