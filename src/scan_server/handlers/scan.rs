//! Single-URL scan handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;

use super::super::types::ScanState;
use crate::app::NormalizedUrl;
use crate::config::INVALID_URL_MESSAGE;
use crate::error_handling::{ErrorType, ScanError};

/// `POST /api/scan` with body `{"url": "<string>"}`
///
/// Responds 200 with the scan result, 400 when the body carries no usable
/// URL, and 500 when the URL could not be fetched at all.
pub async fn scan_handler(
    State(state): State<ScanState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let raw = match payload {
        Ok(Json(body)) => requested_url(&body),
        Err(rejection) => {
            log::debug!("Rejected scan request body: {rejection}");
            None
        }
    };

    let Some(url) = raw.and_then(|raw| NormalizedUrl::parse(&raw).ok()) else {
        state.scans_rejected.fetch_add(1, Ordering::SeqCst);
        state.error_stats().increment_error(ErrorType::InvalidInput);
        return error_response(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE);
    };

    match state.resolver.resolve(&url).await {
        Ok(result) => {
            state.scans_served.fetch_add(1, Ordering::SeqCst);
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(ScanError::InvalidInput(_)) => {
            state.scans_rejected.fetch_add(1, Ordering::SeqCst);
            error_response(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE)
        }
        Err(e) => {
            state.scans_failed.fetch_add(1, Ordering::SeqCst);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// The `url` field, if present, a string, and not blank.
fn requested_url(body: &Value) -> Option<String> {
    body.get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
