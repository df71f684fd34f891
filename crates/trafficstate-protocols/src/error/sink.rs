//! Downstream sink errors.

use thiserror::Error;

use super::routing::format_call_failure;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("Sink push failed: {}", format_call_failure(.status, .message))]
    ExternalCallFailure { status: Option<u16>, message: String },

    #[error("Sink push timed out after {0} seconds")]
    Timeout(u64),

    #[error("Invalid sink target: {0}")]
    InvalidTarget(String),
}
