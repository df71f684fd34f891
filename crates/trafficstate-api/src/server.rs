//! Interface server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Request, ServiceExt};
use tokio::net::TcpListener;
use tracing::info;

use crate::error::InterfaceError;
use crate::http::routes::create_app;
use crate::state::AppState;

/// Interface server configuration.
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    pub host: String,
    pub port: u16,
}

impl InterfaceConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// The interface server.
pub struct InterfaceServer {
    config: InterfaceConfig,
    state: Arc<AppState>,
}

impl InterfaceServer {
    pub fn new(config: InterfaceConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until `shutdown` resolves, then drain open connections.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), InterfaceError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_app(self.state.clone());

        let addr: SocketAddr = self.addr().parse().map_err(|e: std::net::AddrParseError| {
            InterfaceError::Bind {
                addr: self.addr(),
                message: e.to_string(),
            }
        })?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| InterfaceError::Bind {
                addr: self.addr(),
                message: e.to_string(),
            })?;

        info!("Interface server listening on {}", addr);
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| InterfaceError::Server(e.to_string()))?;

        info!("Interface server stopped");
        Ok(())
    }
}
