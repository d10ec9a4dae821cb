//! HTTP dashboard.
//!
//! Serves the paper cards as an HTML page plus a small JSON API. Each
//! visitor gets its own dashboard session, tracked by a cookie.
//!
//! - `GET /` current results
//! - `GET /search` and `GET /ask` form submissions
//! - `GET /api/search` cards as JSON
//! - `GET /health`

pub mod html;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

pub use routes::{AppState, SESSION_COOKIE, create_router};

use crate::pipeline::Pipeline;
use crate::summarizer::Summarizer;

/// Dashboard server over a search pipeline.
pub struct DashboardServer {
    state: Arc<AppState>,
}

impl DashboardServer {
    /// Create a new dashboard server.
    #[must_use]
    pub fn new(pipeline: Pipeline, summarizer: Summarizer) -> Self {
        Self { state: Arc::new(AppState::new(pipeline, summarizer)) }
    }

    /// Router serving this dashboard.
    #[must_use]
    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state))
    }

    /// Run the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns error if the port cannot be bound or the server fails.
    pub async fn run(self, port: u16) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Dashboard listening on http://{}", addr);

        axum::serve(listener, self.router()).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("Dashboard shut down");
        Ok(())
    }
}

/// Wait for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
