//! reqwest-backed [`RoutingClient`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use trafficstate_protocols::{RequestDescriptor, RequestMethod, RoutingClient, RoutingError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest error body carried into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Routing client calling the Bing Maps REST API.
pub struct BingRoutingClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl BingRoutingClient {
    /// Create a client whose every call is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, RoutingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RoutingError::ExternalCallFailure {
                status: None,
                message: e.to_string(),
            })?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_send_error(&self, e: reqwest::Error) -> RoutingError {
        if e.is_timeout() {
            return RoutingError::Timeout(self.timeout.as_secs());
        }
        // The URL carries the API key.
        let e = e.without_url();
        RoutingError::ExternalCallFailure {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl RoutingClient for BingRoutingClient {
    fn id(&self) -> &str {
        "bing"
    }

    async fn call(&self, request: &RequestDescriptor) -> Result<String, RoutingError> {
        debug!("{} {}", request.method, request.redacted_url());

        let builder = match request.method {
            RequestMethod::Get => self.client.get(&request.url),
        };
        let response = builder
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(
                body.char_indices()
                    .nth(MAX_ERROR_BODY)
                    .map_or(body.len(), |(i, _)| i),
            );
            return Err(RoutingError::ExternalCallFailure {
                status: Some(status.as_u16()),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                RoutingError::Timeout(self.timeout.as_secs())
            } else {
                RoutingError::MalformedResponse(e.without_url().to_string())
            }
        })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
