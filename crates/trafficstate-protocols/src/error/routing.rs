//! Routing errors: link construction and routing-API calls.

use std::fmt;

use thiserror::Error;

/// Which end of a route failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Finish,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "starting point"),
            Self::Finish => write!(f, "finishing point"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Route {route_id} has no resolvable {endpoint} (waypoint {waypoint_id})")]
    MissingEndpoint {
        route_id: String,
        endpoint: Endpoint,
        waypoint_id: String,
    },

    #[error("Route {route_id} references unknown via waypoint {waypoint_id}")]
    MissingWaypoint { route_id: String, waypoint_id: String },

    #[error("Routing API call failed: {}", format_call_failure(.status, .message))]
    ExternalCallFailure { status: Option<u16>, message: String },

    #[error("Routing API call timed out after {0} seconds")]
    Timeout(u64),

    #[error("Malformed routing API response: {0}")]
    MalformedResponse(String),
}

pub(crate) fn format_call_failure(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{} - {}", status, message),
        None => message.to_string(),
    }
}

impl RoutingError {
    /// Transport failures and non-success statuses, as opposed to bad payloads.
    pub fn is_external_call_failure(&self) -> bool {
        matches!(self, Self::ExternalCallFailure { .. } | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_endpoint_display() {
        let err = RoutingError::MissingEndpoint {
            route_id: "R1".to_string(),
            endpoint: Endpoint::Finish,
            waypoint_id: "paris".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("R1"));
        assert!(display.contains("finishing point"));
        assert!(display.contains("paris"));
    }

    #[test]
    fn test_external_call_failure_with_status() {
        let err = RoutingError::ExternalCallFailure {
            status: Some(401),
            message: "Access was denied".to_string(),
        };
        assert!(err.to_string().contains("401 - Access was denied"));
        assert!(err.is_external_call_failure());
    }

    #[test]
    fn test_external_call_failure_transport() {
        let err = RoutingError::ExternalCallFailure {
            status: None,
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().ends_with("connection refused"));
    }

    #[test]
    fn test_malformed_is_not_call_failure() {
        let err = RoutingError::MalformedResponse("missing resourceSets".to_string());
        assert!(!err.is_external_call_failure());
        assert!(RoutingError::Timeout(30).is_external_call_failure());
    }
}
