//! Graceful shutdown trigger for `axum::serve`.

use std::future::Future;
use std::io;

/// Resolves once `signal` fires.
///
/// If the listener cannot be installed the error is logged and this never
/// resolves, so the server keeps running instead of shutting down at boot.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_resolves_on_signal() {
        tokio::time::timeout(Duration::from_millis(100), wait_for_shutdown(async { Ok(()) }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_listener_failure_keeps_serving() {
        let failed = async { Err(io::Error::other("no signal handler")) };
        let result = tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(failed)).await;
        assert!(result.is_err());
    }
}
