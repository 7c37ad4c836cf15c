//! JSON status handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::atomic::Ordering;

use super::super::types::{ErrorCounts, InfoCounts, ScanState, StatusResponse};
use crate::error_handling::{ErrorType, InfoType};

/// JSON status endpoint with scan counters and error/info totals
pub async fn status_handler(State(state): State<ScanState>) -> Response {
    (StatusCode::OK, Json(build_status(&state))).into_response()
}

pub(crate) fn build_status(state: &ScanState) -> StatusResponse {
    let stats = state.error_stats();

    let timeout = stats.get_error_count(ErrorType::HttpRequestTimeoutError);
    let connection_error = stats.get_error_count(ErrorType::HttpRequestConnectError);
    let fetch_failure = stats.get_error_count(ErrorType::FetchFailure);
    let invalid_input = stats.get_error_count(ErrorType::InvalidInput);
    let total_errors = stats.total_errors();

    StatusResponse {
        scans_served: state.scans_served.load(Ordering::SeqCst),
        scans_rejected: state.scans_rejected.load(Ordering::SeqCst),
        scans_failed: state.scans_failed.load(Ordering::SeqCst),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        errors: ErrorCounts {
            total: total_errors,
            timeout,
            connection_error,
            fetch_failure,
            invalid_input,
            other_error: total_errors
                .saturating_sub(timeout)
                .saturating_sub(connection_error)
                .saturating_sub(fetch_failure)
                .saturating_sub(invalid_input),
        },
        info: InfoCounts {
            total: stats.total_info(),
            http_redirect: stats.get_info_count(InfoType::HttpRedirect),
            https_redirect: stats.get_info_count(InfoType::HttpsRedirect),
            multiple_redirects: stats.get_info_count(InfoType::MultipleRedirects),
            probe_fallback: stats.get_info_count(InfoType::ProbeFallback),
            self_redirect: stats.get_info_count(InfoType::SelfRedirect),
            hop_limit: stats.get_info_count(InfoType::HopLimit),
            missing_location: stats.get_info_count(InfoType::MissingLocation),
            invalid_location: stats.get_info_count(InfoType::InvalidLocation),
        },
    }
}
