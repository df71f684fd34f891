//! Routing-API protocol definitions.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::RoutingError;

/// HTTP method of a routing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestMethod {
    Get,
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
        }
    }
}

/// A fully formed request against the routing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    pub method: RequestMethod,
    pub url: String,
}

impl RequestDescriptor {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            url: url.into(),
        }
    }

    /// The URL with the value of the `key` query parameter masked, for logs.
    pub fn redacted_url(&self) -> String {
        match self.url.find("&key=").or_else(|| self.url.find("?key=")) {
            Some(pos) => {
                let value_start = pos + "&key=".len();
                let value_end = self.url[value_start..]
                    .find('&')
                    .map(|i| value_start + i)
                    .unwrap_or(self.url.len());
                format!("{}***{}", &self.url[..value_start], &self.url[value_end..])
            }
            None => self.url.clone(),
        }
    }
}

/// Executes routing requests.
///
/// Implementations must bound every call with a timeout and report
/// transport/status failures (`ExternalCallFailure`, `Timeout`) separately
/// from unreadable bodies (`MalformedResponse`).
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Returns the client ID.
    fn id(&self) -> &str;

    /// Perform the request and return the raw response body.
    async fn call(&self, request: &RequestDescriptor) -> Result<String, RoutingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_descriptor() {
        let desc = RequestDescriptor::get("https://example.com/Routes?wayPoint.1=1%2c2");
        assert_eq!(desc.method, RequestMethod::Get);
        assert_eq!(desc.method.to_string(), "GET");
    }

    #[test]
    fn test_redacted_url() {
        let desc = RequestDescriptor::get("https://example.com/Routes?wayPoint.1=1%2c2&key=secret");
        assert_eq!(
            desc.redacted_url(),
            "https://example.com/Routes?wayPoint.1=1%2c2&key=***"
        );
    }

    #[test]
    fn test_redacted_url_keeps_trailing_params() {
        let desc = RequestDescriptor::get("https://example.com/Routes?key=secret&foo=bar");
        assert_eq!(desc.redacted_url(), "https://example.com/Routes?key=***&foo=bar");
    }

    #[test]
    fn test_redacted_url_without_key() {
        let desc = RequestDescriptor::get("https://example.com/Routes");
        assert_eq!(desc.redacted_url(), desc.url);
    }
}
