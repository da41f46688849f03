//! Configuration for the feed module.

use std::time::Duration;

/// GraphQL endpoint used by default.
pub const GRAPHQL_ENDPOINT: &str = "https://graphqlzero.almansi.me/api";

/// Environment variable overriding the GraphQL endpoint.
pub const ENDPOINT_ENV: &str = "TECHVIB_GRAPHQL_ENDPOINT";

/// Configuration for the feed gateway.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// GraphQL endpoint receiving the posts query.
    pub endpoint: String,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| GRAPHQL_ENDPOINT.to_string()),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl FeedConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GraphQL endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
