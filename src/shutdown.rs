use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// Graceful shutdown handler that listens for termination signals and
/// coordinates the shutdown sequence
#[derive(Clone)]
pub struct GracefulShutdown {
    shutdown_timeout: Duration,
}

impl GracefulShutdown {
    pub fn new(shutdown_timeout: Duration) -> Self {
        Self { shutdown_timeout }
    }

    /// Wait for termination signals (SIGTERM, SIGINT, or Ctrl+C)
    pub async fn wait_for_shutdown_signal(&self) {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
            }
            _ = terminate => {
                info!("Received SIGTERM, initiating graceful shutdown");
            }
        }
    }

    /// Execute the shutdown sequence with timeout
    pub async fn execute_shutdown<F, Fut>(&self, shutdown_fn: F) -> Result<(), ShutdownError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<(), ShutdownError>>,
    {
        info!(
            "Starting graceful shutdown sequence with timeout of {:?}",
            self.shutdown_timeout
        );

        match tokio::time::timeout(self.shutdown_timeout, shutdown_fn()).await {
            Ok(Ok(())) => {
                info!("Graceful shutdown completed successfully");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("Error during graceful shutdown: {}", e);
                Err(e)
            }
            Err(_) => {
                warn!(
                    "Graceful shutdown timed out after {:?}, forcing exit",
                    self.shutdown_timeout
                );
                Err(ShutdownError::Timeout)
            }
        }
    }
}

/// Errors that can occur during shutdown
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("Shutdown timed out")]
    Timeout,

    #[error("Database shutdown error: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shutdown_sequence_completes_within_timeout() {
        let shutdown = GracefulShutdown::new(Duration::from_secs(1));
        let result = shutdown.execute_shutdown(|| async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn slow_shutdown_times_out() {
        let shutdown = GracefulShutdown::new(Duration::from_millis(10));
        let result = shutdown
            .execute_shutdown(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(ShutdownError::Timeout)));
    }

    #[tokio::test]
    async fn shutdown_errors_are_propagated() {
        let shutdown = GracefulShutdown::new(Duration::from_secs(1));
        let result = shutdown
            .execute_shutdown(|| async { Err(ShutdownError::Database("pool closed".to_string())) })
            .await;
        assert!(matches!(result, Err(ShutdownError::Database(_))));
    }
}
