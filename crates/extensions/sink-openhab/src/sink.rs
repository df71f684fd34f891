//! Pushes state text to openHAB items over the REST API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use trafficstate_protocols::{SinkError, StateSink};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `StateSink` sending `POST {base}items/{item}` with a `text/plain` body.
pub struct OpenHabSink {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl OpenHabSink {
    /// `base_url` is the REST root, e.g. `http://openhab:8080/rest/`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SinkError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| SinkError::InvalidTarget(format!("{}: {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::ExternalCallFailure {
                status: None,
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the item named `item_name`.
    pub fn item_url(&self, item_name: &str) -> Result<Url, SinkError> {
        if item_name.is_empty() || item_name.contains('/') {
            return Err(SinkError::InvalidTarget(format!(
                "invalid item name '{}'",
                item_name
            )));
        }
        self.base_url
            .join(&format!("items/{}", item_name))
            .map_err(|e| SinkError::InvalidTarget(e.to_string()))
    }
}

#[async_trait]
impl StateSink for OpenHabSink {
    fn id(&self) -> &str {
        "openhab"
    }

    async fn push(&self, item_name: &str, body: &str) -> Result<(), SinkError> {
        let url = self.item_url(item_name)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header("content-type", "text/plain")
            .header("accept", "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout(self.timeout.as_secs())
                } else {
                    SinkError::ExternalCallFailure {
                        status: e.status().map(|s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SinkError::ExternalCallFailure {
                status: Some(status.as_u16()),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            });
        }

        info!("Item {} updated", item_name);
        Ok(())
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
