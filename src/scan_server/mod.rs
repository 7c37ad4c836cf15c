//! HTTP API for single-URL scans.
//!
//! Provides two endpoints:
//! - `POST /api/scan` - resolve one URL and return its redirect chain
//! - `GET /status` - JSON counters for the running server
//!
//! Each request is resolved independently; the server itself has no queue.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::app::cancel_on_signal;
use handlers::{scan_handler, status_handler};
pub use types::{ScanState, StatusResponse};

/// Builds the router with both endpoints bound to `state`.
pub fn router(state: ScanState) -> Router {
    Router::new()
        .route("/api/scan", post(scan_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `127.0.0.1:<port>` and serves the API until Ctrl-C.
pub async fn start_scan_server(port: u16, state: ScanState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind scan server to port {}: {}", port, e))?;

    log::info!("Scan server listening on http://127.0.0.1:{}/", port);
    log::info!("  - Scan: POST http://127.0.0.1:{}/api/scan", port);
    log::info!("  - Status: http://127.0.0.1:{}/status", port);

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), shutdown.clone()));

    serve(listener, state, shutdown).await
}

/// Serves the API on an already bound listener until `shutdown` fires.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: ScanState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Scan server error: {}", e))?;

    Ok(())
}
