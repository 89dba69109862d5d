//! History gateway service: validated config, router, HTTP server.

use crate::domain::{GatewayConfig, GatewayError};
use crate::router::{build_router, AppState};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// HTTP gateway over the history subsystems.
pub struct HistoryGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl HistoryGatewayService {
    /// Create the gateway. Fails on invalid configuration.
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, state })
    }

    /// The configured router.
    pub fn router(&self) -> Router {
        build_router(&self.config, self.state.clone())
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight
    /// requests.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        info!(
            addr = ?addr,
            prefix = %self.config.path_prefix,
            "History gateway listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("History gateway stopped");
        Ok(())
    }
}
