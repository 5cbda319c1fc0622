//! Transport seam for the two comment endpoints.

use async_trait::async_trait;
use thiserror::Error;

/// Failure at the feed boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Network failure or non-2xx response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Response body did not decode as the expected payload.
    #[error("decode failure: {0}")]
    Decode(String),
}

/// Read-only access to the server's list and count endpoints.
///
/// Implementations own transport, authentication and any retry policy; the
/// scheduler only sees raw response bodies. One feed serves one widget.
#[async_trait]
pub trait CommentFeed: Send + Sync {
    /// Fetch the full comment list. Returns the raw JSON array body.
    async fn fetch_list(&self, url: &str) -> Result<String, FeedError>;

    /// Fetch the comment count. Returns the raw JSON object body.
    async fn fetch_count(&self, url: &str) -> Result<String, FeedError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let e = FeedError::Transport("connection refused".into());
        assert_eq!(e.to_string(), "transport failure: connection refused");

        let e = FeedError::Decode("not json".into());
        assert_eq!(e.to_string(), "decode failure: not json");
    }
}
