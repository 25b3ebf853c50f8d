//! Server startup and graceful shutdown

use anyhow::{Context, Result};
use axum::Router;
use barnlog_core::Config;
use tokio_util::sync::CancellationToken;

/// Start the server with graceful shutdown
///
/// After SIGINT or SIGTERM, in-flight requests get `BARNLOG_SHUTDOWN_TIMEOUT_SECS` to finish.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server ready and accepting connections");

    let shutdown = CancellationToken::new();
    let mut server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
        }
    });

    tokio::select! {
        result = &mut server => {
            result.context("Server task failed")??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    shutdown.cancel();

    match tokio::time::timeout(config.shutdown_timeout(), &mut server).await {
        Ok(result) => {
            result.context("Server task failed")??;
            tracing::info!("Server stopped");
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = config.shutdown_timeout().as_secs(),
                "Graceful shutdown timed out, abandoning in-flight requests"
            );
            server.abort();
        }
    }

    Ok(())
}

/// Signal handler for graceful shutdown
///
/// Resolves on Ctrl+C (SIGINT) or SIGTERM. If a handler cannot be installed the error is
/// logged and that signal is ignored.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
