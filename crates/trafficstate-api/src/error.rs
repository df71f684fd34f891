//! Interface error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use trafficstate_protocols::RegistryError;

#[derive(Debug, Error)]
pub enum InterfaceError {
    /// Lookup of a route, waypoint or job failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("Server error: {0}")]
    Server(String),
}

impl IntoResponse for InterfaceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Registry(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Registry(_) => StatusCode::BAD_REQUEST,
            Self::Bind { .. } | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
