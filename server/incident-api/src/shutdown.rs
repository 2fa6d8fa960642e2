//! Graceful shutdown signal handling.

use std::io;

use thiserror::Error;
use tokio::signal;
use tracing::{error, info};

#[derive(Debug, Error)]
enum ShutdownSignalError {
  #[error("failed to install Ctrl+C handler: {0}")]
  CtrlC(#[source] io::Error),

  #[cfg(unix)]
  #[error("failed to install SIGTERM handler: {0}")]
  SigTerm(#[source] io::Error),
}

/// Resolves on Ctrl+C or SIGTERM. If no handler can be installed the server
/// keeps running until killed.
pub async fn signal() {
  if let Err(e) = wait().await {
    error!("{e}");
    std::future::pending::<()>().await;
  }
}

async fn wait() -> Result<(), ShutdownSignalError> {
  let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .map_err(ShutdownSignalError::SigTerm)?
      .recv()
      .await;
    Ok::<(), ShutdownSignalError>(())
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

  tokio::select! {
    result = ctrl_c => {
      result?;
      info!("ctrl_c signal received");
    }
    result = terminate => {
      result?;
      info!("terminate signal received");
    }
  }

  Ok(())
}
