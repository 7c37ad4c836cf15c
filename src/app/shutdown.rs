//! Graceful shutdown handling.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Waits for `signal` and cancels `token` once it fires.
///
/// If the signal handler cannot be installed the error is logged and `token`
/// is left alone, so the run continues without Ctrl-C support.
pub async fn cancel_on_signal<F>(signal: F, token: CancellationToken)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            log::warn!("Received Ctrl-C, shutting down");
            token.cancel();
        }
        Err(e) => log::error!("Failed to listen for Ctrl-C: {e}"),
    }
}

/// Stops the background progress logger and waits for it to exit.
///
/// `logging_cancel` is the logger's own token, separate from the batch token so
/// a finished batch and an interrupted one shut down the same way.
pub async fn shutdown_gracefully(
    logging_cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    logging_cancel.cancel();
    if let Some(logging_task) = logging_task {
        if let Err(e) = logging_task.await {
            log::warn!("Progress logging task did not exit cleanly: {e}");
        }
    }
}
