//! Scan result data model.
//!
//! These types are what the resolver returns and what the batch driver, the CLI
//! output and the HTTP API serialize. Field names on the wire are camelCase.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::config::{ERROR_STATUS_PLACEHOLDER, NO_RESPONSE_PLACEHOLDER};

/// A status as reported on the wire: a number, or a placeholder string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// An HTTP status code was observed.
    Code(u16),
    /// No response was obtained. Serialized as `"—"`.
    NoResponse,
    /// The URL could not be scanned at all. Serialized as `"error"`.
    Error,
}

impl ScanStatus {
    pub fn is_redirect(&self) -> bool {
        matches!(self, ScanStatus::Code(300..=399))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScanStatus::Code(200..=299))
    }

    /// 4xx, 5xx, or a URL that could not be scanned.
    pub fn is_failure(&self) -> bool {
        matches!(self, ScanStatus::Code(400..) | ScanStatus::Error)
    }
}

impl From<reqwest::StatusCode> for ScanStatus {
    fn from(status: reqwest::StatusCode) -> Self {
        ScanStatus::Code(status.as_u16())
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStatus::Code(code) => write!(f, "{code}"),
            ScanStatus::NoResponse => f.write_str(NO_RESPONSE_PLACEHOLDER),
            ScanStatus::Error => f.write_str(ERROR_STATUS_PLACEHOLDER),
        }
    }
}

impl Serialize for ScanStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScanStatus::Code(code) => serializer.serialize_u16(*code),
            ScanStatus::NoResponse => serializer.serialize_str(NO_RESPONSE_PLACEHOLDER),
            ScanStatus::Error => serializer.serialize_str(ERROR_STATUS_PLACEHOLDER),
        }
    }
}

/// Coarse outcome of a chain, derived from its *first* response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum Classification {
    /// 301 or 308
    #[strum(serialize = "Permanently")]
    Permanently,
    /// 302 or 307
    #[strum(serialize = "Temporarily")]
    Temporarily,
    /// Any other 3xx
    #[strum(serialize = "Redirect")]
    Redirect,
    #[strum(serialize = "OK")]
    Ok,
    #[strum(serialize = "Client Error")]
    ClientError,
    #[strum(serialize = "Server Error")]
    ServerError,
    /// No numeric status, or one below 200
    #[strum(serialize = "Error")]
    Error,
}

impl Classification {
    /// Classifies a chain by the status of its first request.
    pub fn from_initial_status(status: ScanStatus) -> Self {
        match status {
            ScanStatus::Code(301 | 308) => Classification::Permanently,
            ScanStatus::Code(302 | 307) => Classification::Temporarily,
            ScanStatus::Code(300..=399) => Classification::Redirect,
            ScanStatus::Code(200..=299) => Classification::Ok,
            ScanStatus::Code(400..=499) => Classification::ClientError,
            ScanStatus::Code(500..) => Classification::ServerError,
            ScanStatus::Code(_) | ScanStatus::NoResponse | ScanStatus::Error => {
                Classification::Error
            }
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

/// One HTTP exchange within a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Raw `Location` header value, before resolution against `url`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Why resolution stopped.
///
/// Not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A non-redirect response was reached.
    Final,
    /// A 3xx response carried no `Location` header.
    MissingLocation,
    /// A 3xx response carried a `Location` that could not be resolved to a URL.
    InvalidLocation,
    /// `Location` resolved to the URL just requested.
    SelfRedirect,
    /// The hop budget ran out while the chain was still redirecting.
    HopLimit,
    /// The probe failed and the client-followed GET answered instead.
    Fallback,
    /// Neither request produced a response; only seen on degraded rows.
    Failed,
}

/// Outcome of resolving one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Status of the terminal request
    pub status: ScanStatus,
    /// Status of the first request; drives `classification`
    pub initial_status: ScanStatus,
    /// Terminal URL, or the last URL attempted when resolution stopped early
    pub destination: String,
    #[serde(rename = "type")]
    pub classification: Classification,
    /// Headers of the terminal response, names as received
    pub headers: BTreeMap<String, String>,
    pub hops: Vec<Hop>,
    #[serde(skip)]
    pub termination: Termination,
}

impl ScanResult {
    /// Row recorded by the batch driver for a URL that could not be scanned.
    ///
    /// `message` takes the place of the destination so the failure is visible
    /// in the row itself.
    pub fn degraded(message: impl Into<String>) -> Self {
        ScanResult {
            status: ScanStatus::Error,
            initial_status: ScanStatus::NoResponse,
            destination: message.into(),
            classification: Classification::Error,
            headers: BTreeMap::new(),
            hops: Vec::new(),
            termination: Termination::Failed,
        }
    }

    /// True for rows produced by [`ScanResult::degraded`].
    pub fn is_degraded(&self) -> bool {
        self.status == ScanStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification_permanent() {
        for code in [301, 308] {
            assert_eq!(
                Classification::from_initial_status(ScanStatus::Code(code)),
                Classification::Permanently
            );
        }
    }

    #[test]
    fn test_classification_temporary() {
        for code in [302, 307] {
            assert_eq!(
                Classification::from_initial_status(ScanStatus::Code(code)),
                Classification::Temporarily
            );
        }
    }

    #[test]
    fn test_classification_other_redirects() {
        for code in [300, 303, 304, 305, 399] {
            assert_eq!(
                Classification::from_initial_status(ScanStatus::Code(code)),
                Classification::Redirect
            );
        }
    }

    #[test]
    fn test_classification_ranges() {
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Code(200)),
            Classification::Ok
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Code(204)),
            Classification::Ok
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Code(299)),
            Classification::Ok
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Code(404)),
            Classification::ClientError
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Code(500)),
            Classification::ServerError
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Code(599)),
            Classification::ServerError
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Code(101)),
            Classification::Error
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::NoResponse),
            Classification::Error
        );
        assert_eq!(
            Classification::from_initial_status(ScanStatus::Error),
            Classification::Error
        );
    }

    #[test]
    fn test_classification_wire_names() {
        assert_eq!(Classification::ClientError.to_string(), "Client Error");
        assert_eq!(Classification::ServerError.as_ref(), "Server Error");
        assert_eq!(Classification::Ok.to_string(), "OK");
        assert_eq!(
            serde_json::to_value(Classification::Permanently).unwrap(),
            json!("Permanently")
        );
    }

    #[test]
    fn test_scan_status_serialization() {
        assert_eq!(serde_json::to_value(ScanStatus::Code(301)).unwrap(), json!(301));
        assert_eq!(serde_json::to_value(ScanStatus::NoResponse).unwrap(), json!("—"));
        assert_eq!(serde_json::to_value(ScanStatus::Error).unwrap(), json!("error"));
    }

    #[test]
    fn test_scan_status_predicates() {
        assert!(ScanStatus::Code(308).is_redirect());
        assert!(!ScanStatus::Code(200).is_redirect());
        assert!(ScanStatus::Code(200).is_success());
        assert!(ScanStatus::Code(404).is_failure());
        assert!(ScanStatus::Code(503).is_failure());
        assert!(ScanStatus::Error.is_failure());
        assert!(!ScanStatus::NoResponse.is_failure());
    }

    #[test]
    fn test_hop_skips_absent_fields() {
        let hop = Hop {
            url: "http://a/".to_string(),
            status: Some(302),
            location: None,
        };
        assert_eq!(
            serde_json::to_value(&hop).unwrap(),
            json!({"url": "http://a/", "status": 302})
        );
    }

    #[test]
    fn test_scan_result_wire_shape() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "text/html".to_string());
        let result = ScanResult {
            status: ScanStatus::Code(200),
            initial_status: ScanStatus::Code(301),
            destination: "https://example.com/".to_string(),
            classification: Classification::Permanently,
            headers,
            hops: vec![Hop {
                url: "http://example.com".to_string(),
                status: Some(301),
                location: Some("https://example.com/".to_string()),
            }],
            termination: Termination::Final,
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "status": 200,
                "initialStatus": 301,
                "destination": "https://example.com/",
                "type": "Permanently",
                "headers": {"content-type": "text/html"},
                "hops": [{
                    "url": "http://example.com",
                    "status": 301,
                    "location": "https://example.com/"
                }]
            })
        );
    }

    #[test]
    fn test_degraded_result() {
        let result = ScanResult::degraded("connection refused");
        assert!(result.is_degraded());
        assert_eq!(result.classification, Classification::Error);
        assert_eq!(result.destination, "connection refused");
        assert!(result.hops.is_empty());
        assert_eq!(result.termination, Termination::Failed);
        assert_eq!(
            serde_json::to_value(&result).unwrap()["status"],
            json!("error")
        );
    }
}
