// Fetch module tests.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::fetch::request::{collect_headers, extract_location};

fn add_header(headers: &mut HeaderMap, name: &str, value: &str) {
    // In tests, we use known-good header names and values
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .unwrap_or_else(|_| panic!("Invalid header name in test: {}", name));
    let header_value = HeaderValue::from_str(value)
        .unwrap_or_else(|_| panic!("Invalid header value in test: {}", value));
    headers.append(header_name, header_value);
}

#[test]
fn test_collect_headers_basic() {
    let mut headers = HeaderMap::new();
    add_header(&mut headers, "Content-Type", "text/html");
    add_header(&mut headers, "Server", "nginx");

    let result = collect_headers(&headers);
    assert_eq!(result.len(), 2);
    // HeaderName normalizes to lowercase
    assert_eq!(result.get("content-type"), Some(&"text/html".to_string()));
    assert_eq!(result.get("server"), Some(&"nginx".to_string()));
}

#[test]
fn test_collect_headers_joins_repeated_values() {
    let mut headers = HeaderMap::new();
    add_header(&mut headers, "Set-Cookie", "a=1");
    add_header(&mut headers, "Set-Cookie", "b=2");

    let result = collect_headers(&headers);
    assert_eq!(result.get("set-cookie"), Some(&"a=1, b=2".to_string()));
}

#[test]
fn test_collect_headers_empty() {
    assert!(collect_headers(&HeaderMap::new()).is_empty());
}

#[test]
fn test_collect_headers_non_utf8_value() {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-binary"),
        HeaderValue::from_bytes(b"caf\xe9").expect("obs-text is a valid header value"),
    );

    let result = collect_headers(&headers);
    assert_eq!(result.get("x-binary"), Some(&"caf\u{fffd}".to_string()));
}

#[test]
fn test_extract_location_present() {
    let mut headers = HeaderMap::new();
    add_header(&mut headers, "Location", "https://example.com/new");
    assert_eq!(
        extract_location(&headers),
        Some("https://example.com/new".to_string())
    );
}

#[test]
fn test_extract_location_missing_or_empty() {
    let mut headers = HeaderMap::new();
    assert_eq!(extract_location(&headers), None);

    add_header(&mut headers, "Location", "");
    assert_eq!(extract_location(&headers), None);
}
