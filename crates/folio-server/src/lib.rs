//! folio-server: HTTP API for content records and their uploaded assets.
//!
//! This crate wires [`folio_store::ContentService`] into an Axum application:
//!
//! - JSON/multipart content routes under `/content/`
//! - static serving of stored assets under `/uploads/`
//! - OpenAPI document and Swagger UI under `/api-docs`
//! - graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use folio_core::config::Config;

use crate::context::AppContext;

/// Start the folio server.
///
/// Creates the upload root, constructs the [`AppContext`], and serves the
/// router until a shutdown signal is received.
pub async fn start(config: Config) -> folio_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let upload_dir = &config.storage.upload_dir;
    if !upload_dir.exists() {
        std::fs::create_dir_all(upload_dir)?;
        tracing::info!("Created upload directory {}", upload_dir.display());
    }

    let host = config.server.host.clone();
    let port = config.server.port;

    let ctx = AppContext::new(config);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| folio_core::Error::Internal(format!("Failed to bind to {host}:{port}: {e}")))?;

    let addr = listener.local_addr()?;
    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
