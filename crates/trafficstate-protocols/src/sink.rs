//! Downstream state sink protocol.

use async_trait::async_trait;

use crate::error::SinkError;

/// Receives route state text, one item per route.
#[async_trait]
pub trait StateSink: Send + Sync {
    /// Returns the sink ID.
    fn id(&self) -> &str;

    /// Push `body` as the new plain-text state of `item_name`.
    async fn push(&self, item_name: &str, body: &str) -> Result<(), SinkError>;
}
